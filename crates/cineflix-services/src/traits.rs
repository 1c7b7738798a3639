use crate::error::ServiceResult;
use crate::payload::FilmCollection;
use async_trait::async_trait;
use cineflix_models::{
    CollectionType, FilterCriteria, Genre, HealthRecord, NewWatchlistEntry, Notification,
    NotificationPreferences, RemoteFilm, SearchResult, SortCriteria, SortOrder, SuggestedFilm,
    WatchlistEntry, WatchlistStatus,
};
use serde_json::Value;

#[cfg(any(test, feature = "mock"))]
use mockall::automock;

/// Common surface of every backend microservice
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait ServiceApi: Send + Sync {
    fn service_name(&self) -> &'static str;

    async fn health(&self) -> ServiceResult<HealthRecord>;
}

#[async_trait]
pub trait RecommendationApi: ServiceApi {
    /// Create or refresh the user's profile
    async fn create_user_profile(
        &self,
        user_id: &str,
        watch_history: &[RemoteFilm],
        ratings: &[(String, u8)],
    ) -> ServiceResult<Value>;

    async fn add_rating(&self, user_id: &str, film_id: &str, score: u8) -> ServiceResult<Value>;

    async fn get_recommendations(&self, user_id: &str, count: u32) -> ServiceResult<Vec<SuggestedFilm>>;

    async fn get_trending(&self) -> ServiceResult<Vec<SuggestedFilm>>;

    async fn get_personalized_trending(&self, user_id: &str) -> ServiceResult<Vec<SuggestedFilm>>;

    /// The service's film catalog
    async fn get_all_films(&self) -> ServiceResult<Vec<SuggestedFilm>>;
}

#[async_trait]
pub trait WatchlistApi: ServiceApi {
    async fn add_to_watchlist(&self, user_id: &str, entry: &NewWatchlistEntry) -> ServiceResult<Value>;

    async fn get_watchlist(
        &self,
        user_id: &str,
        status: Option<WatchlistStatus>,
    ) -> ServiceResult<Vec<WatchlistEntry>>;

    async fn remove_from_watchlist(&self, user_id: &str, film_id: &str) -> ServiceResult<Value>;

    async fn update_film_status(
        &self,
        user_id: &str,
        film_id: &str,
        status: &WatchlistStatus,
    ) -> ServiceResult<Value>;

    async fn set_notification_preferences(
        &self,
        user_id: &str,
        preferences: &NotificationPreferences,
    ) -> ServiceResult<Value>;

    async fn get_notifications(&self, user_id: &str) -> ServiceResult<Vec<Notification>>;

    async fn check_releases(&self) -> ServiceResult<Value>;

    async fn process_notifications(&self) -> ServiceResult<Value>;

    async fn get_upcoming_releases(&self) -> ServiceResult<Vec<SuggestedFilm>>;
}

#[async_trait]
pub trait SortingApi: ServiceApi {
    async fn sort_films(
        &self,
        user_id: &str,
        criteria: SortCriteria,
        order: SortOrder,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>>;

    async fn filter_films(
        &self,
        user_id: &str,
        filters: &FilterCriteria,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>>;

    async fn sort_and_filter_films(
        &self,
        user_id: &str,
        criteria: SortCriteria,
        order: SortOrder,
        filters: &FilterCriteria,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>>;

    async fn get_film_collection(&self, user_id: &str, film_type: CollectionType) -> ServiceResult<FilmCollection>;

    /// Replace the stored collections wholesale
    async fn update_film_collection(
        &self,
        user_id: &str,
        watched: &[RemoteFilm],
        watchlist: &[RemoteFilm],
    ) -> ServiceResult<Value>;

    async fn get_filter_options(&self, user_id: &str, film_type: CollectionType) -> ServiceResult<Value>;
}

#[async_trait]
pub trait WildcardApi: ServiceApi {
    async fn get_wildcard_suggestion(&self) -> ServiceResult<SuggestedFilm>;

    async fn get_genre_wildcard(&self, genre_id: &str) -> ServiceResult<SuggestedFilm>;

    async fn get_available_genres(&self) -> ServiceResult<Vec<Genre>>;

    async fn test_responsiveness(&self) -> ServiceResult<Value>;
}

/// Third-party movie catalog search
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait MovieSearch: Send + Sync {
    async fn search_movies(&self, query: &str) -> ServiceResult<Vec<SearchResult>>;

    /// Base URL poster paths are resolved against
    fn image_base_url(&self) -> String;
}
