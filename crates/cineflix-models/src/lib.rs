pub mod criteria;
mod de;
pub mod film;
pub mod health;
pub mod notification;
pub mod remote_film;
pub mod search;
pub mod suggestion;
pub mod watchlist;

pub use criteria::{CollectionType, FilterCriteria, SortCriteria, SortOrder};
pub use de::clamp_rating;
pub use film::{parse_watched_date, Film, FilmYear, WATCHED_DATE_FORMAT};
pub use health::{HealthRecord, HealthReport, HealthStatus};
pub use notification::{Notification, NotificationPreferences};
pub use remote_film::RemoteFilm;
pub use search::{FilmDraft, SearchResult};
pub use suggestion::{Genre, SuggestedFilm};
pub use watchlist::{NewWatchlistEntry, WatchlistEntry, WatchlistStatus};
