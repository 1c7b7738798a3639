pub mod recommendation;
pub mod sorting;
pub mod tmdb;
pub mod watchlist;
pub mod wildcard;

pub use recommendation::RecommendationClient;
pub use sorting::SortingClient;
pub use tmdb::TmdbClient;
pub use watchlist::WatchlistClient;
pub use wildcard::WildcardClient;
