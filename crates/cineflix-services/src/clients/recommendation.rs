use crate::error::ServiceResult;
use crate::http::ApiClient;
use crate::payload;
use crate::traits::{RecommendationApi, ServiceApi};
use async_trait::async_trait;
use cineflix_models::{HealthRecord, RemoteFilm, SuggestedFilm};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody<'a> {
    watch_history: &'a [RemoteFilm],
    ratings: Vec<RatingBody<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingBody<'a> {
    film_id: &'a str,
    score: u8,
}

#[derive(Serialize)]
struct CountBody {
    count: u32,
}

/// Client for the recommendation service (profiles, ratings, suggestions, trending)
#[derive(Clone, Debug)]
pub struct RecommendationClient {
    api: ApiClient,
}

impl RecommendationClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ServiceApi for RecommendationClient {
    fn service_name(&self) -> &'static str {
        "recommendation"
    }

    async fn health(&self) -> ServiceResult<HealthRecord> {
        self.api.get(&["health"]).await
    }
}

#[async_trait]
impl RecommendationApi for RecommendationClient {
    async fn create_user_profile(
        &self,
        user_id: &str,
        watch_history: &[RemoteFilm],
        ratings: &[(String, u8)],
    ) -> ServiceResult<Value> {
        let body = ProfileBody {
            watch_history,
            ratings: ratings
                .iter()
                .map(|(film_id, score)| RatingBody { film_id, score: *score })
                .collect(),
        };
        self.api.post(&["api", "users", user_id, "profile"], &body).await
    }

    async fn add_rating(&self, user_id: &str, film_id: &str, score: u8) -> ServiceResult<Value> {
        let body = RatingBody { film_id, score };
        self.api.post(&["api", "users", user_id, "ratings"], &body).await
    }

    async fn get_recommendations(&self, user_id: &str, count: u32) -> ServiceResult<Vec<SuggestedFilm>> {
        let value: Value = self
            .api
            .post(&["api", "recommendations", user_id], &CountBody { count })
            .await?;
        payload::list(value)
    }

    async fn get_trending(&self) -> ServiceResult<Vec<SuggestedFilm>> {
        payload::list(self.api.get(&["api", "trending"]).await?)
    }

    async fn get_personalized_trending(&self, user_id: &str) -> ServiceResult<Vec<SuggestedFilm>> {
        let value: Value = self
            .api
            .post_empty(&["api", "trending", "personalized", user_id])
            .await?;
        payload::list(value)
    }

    async fn get_all_films(&self) -> ServiceResult<Vec<SuggestedFilm>> {
        payload::list(self.api.get(&["api", "films"]).await?)
    }
}
