pub mod diff;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod tracker;

pub use diff::RatingLedger;
pub use error::TrackerError;
pub use filter::{filter_films, matches_filter, sort_films};
pub use navigation::{Notice, NoticeKind, Page};
pub use tracker::{
    FilmListing, FilmTracker, FilmUpdate, NewFilm, PendingAction, StartupReport, SyncReport,
    LIMITED_FEATURES_MESSAGE,
};
