use crate::error::ServiceResult;
use crate::http::ApiClient;
use crate::payload;
use crate::traits::{ServiceApi, WatchlistApi};
use async_trait::async_trait;
use cineflix_models::{
    HealthRecord, NewWatchlistEntry, Notification, NotificationPreferences, SuggestedFilm,
    WatchlistEntry, WatchlistStatus,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

/// Client for the watchlist and release-notification service
#[derive(Clone, Debug)]
pub struct WatchlistClient {
    api: ApiClient,
}

impl WatchlistClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ServiceApi for WatchlistClient {
    fn service_name(&self) -> &'static str {
        "watchlist"
    }

    async fn health(&self) -> ServiceResult<HealthRecord> {
        self.api.get(&["health"]).await
    }
}

#[async_trait]
impl WatchlistApi for WatchlistClient {
    async fn add_to_watchlist(&self, user_id: &str, entry: &NewWatchlistEntry) -> ServiceResult<Value> {
        self.api.post(&["api", "watchlist", user_id, "films"], entry).await
    }

    async fn get_watchlist(
        &self,
        user_id: &str,
        status: Option<WatchlistStatus>,
    ) -> ServiceResult<Vec<WatchlistEntry>> {
        let path = ["api", "watchlist", user_id];
        let value: Value = match status {
            Some(status) => self.api.get_with_query(&path, &[("status", status.as_str())]).await?,
            None => self.api.get(&path).await?,
        };
        payload::list(value)
    }

    async fn remove_from_watchlist(&self, user_id: &str, film_id: &str) -> ServiceResult<Value> {
        self.api
            .delete(&["api", "watchlist", user_id, "films", film_id])
            .await
    }

    async fn update_film_status(
        &self,
        user_id: &str,
        film_id: &str,
        status: &WatchlistStatus,
    ) -> ServiceResult<Value> {
        let body = StatusBody { status: status.as_str() };
        self.api
            .patch(&["api", "watchlist", user_id, "films", film_id], &body)
            .await
    }

    async fn set_notification_preferences(
        &self,
        user_id: &str,
        preferences: &NotificationPreferences,
    ) -> ServiceResult<Value> {
        self.api
            .post(
                &["api", "watchlist", user_id, "notifications", "preferences"],
                preferences,
            )
            .await
    }

    async fn get_notifications(&self, user_id: &str) -> ServiceResult<Vec<Notification>> {
        payload::list(self.api.get(&["api", "notifications", user_id]).await?)
    }

    async fn check_releases(&self) -> ServiceResult<Value> {
        self.api.post_empty(&["api", "notifications", "check-releases"]).await
    }

    async fn process_notifications(&self) -> ServiceResult<Value> {
        self.api.post_empty(&["api", "notifications", "process"]).await
    }

    async fn get_upcoming_releases(&self) -> ServiceResult<Vec<SuggestedFilm>> {
        payload::list(self.api.get(&["api", "releases", "upcoming"]).await?)
    }
}
