//! mockall doubles for the service traits.
//!
//! The sub-traits all extend [`ServiceApi`], so each double implements both.
//! Enabled for this crate's tests and for dependents through the `mock` feature.

use crate::error::ServiceResult;
use crate::payload::FilmCollection;
use crate::traits::{RecommendationApi, ServiceApi, SortingApi, WatchlistApi, WildcardApi};
use async_trait::async_trait;
use cineflix_models::{
    CollectionType, FilterCriteria, Genre, HealthRecord, NewWatchlistEntry, Notification,
    NotificationPreferences, RemoteFilm, SortCriteria, SortOrder, SuggestedFilm, WatchlistEntry,
    WatchlistStatus,
};
use mockall::mock;
use serde_json::Value;

pub use crate::traits::{MockMovieSearch, MockServiceApi};

mock! {
    pub Recommendation {}

    #[async_trait]
    impl ServiceApi for Recommendation {
        fn service_name(&self) -> &'static str;
        async fn health(&self) -> ServiceResult<HealthRecord>;
    }

    #[async_trait]
    impl RecommendationApi for Recommendation {
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
        async fn get_all_films(&self) -> ServiceResult<Vec<SuggestedFilm>>;
    }
}

mock! {
    pub Watchlist {}

    #[async_trait]
    impl ServiceApi for Watchlist {
        fn service_name(&self) -> &'static str;
        async fn health(&self) -> ServiceResult<HealthRecord>;
    }

    #[async_trait]
    impl WatchlistApi for Watchlist {
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
}

mock! {
    pub Sorting {}

    #[async_trait]
    impl ServiceApi for Sorting {
        fn service_name(&self) -> &'static str;
        async fn health(&self) -> ServiceResult<HealthRecord>;
    }

    #[async_trait]
    impl SortingApi for Sorting {
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
        async fn update_film_collection(
            &self,
            user_id: &str,
            watched: &[RemoteFilm],
            watchlist: &[RemoteFilm],
        ) -> ServiceResult<Value>;
        async fn get_filter_options(&self, user_id: &str, film_type: CollectionType) -> ServiceResult<Value>;
    }
}

mock! {
    pub Wildcard {}

    #[async_trait]
    impl ServiceApi for Wildcard {
        fn service_name(&self) -> &'static str;
        async fn health(&self) -> ServiceResult<HealthRecord>;
    }

    #[async_trait]
    impl WildcardApi for Wildcard {
        async fn get_wildcard_suggestion(&self) -> ServiceResult<SuggestedFilm>;
        async fn get_genre_wildcard(&self, genre_id: &str) -> ServiceResult<SuggestedFilm>;
        async fn get_available_genres(&self) -> ServiceResult<Vec<Genre>>;
        async fn test_responsiveness(&self) -> ServiceResult<Value>;
    }
}
