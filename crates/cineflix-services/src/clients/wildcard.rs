use crate::error::ServiceResult;
use crate::http::ApiClient;
use crate::payload;
use crate::traits::{ServiceApi, WildcardApi};
use async_trait::async_trait;
use cineflix_models::{Genre, HealthRecord, SuggestedFilm};
use serde_json::Value;

/// Client for the random film suggestion service
#[derive(Clone, Debug)]
pub struct WildcardClient {
    api: ApiClient,
}

impl WildcardClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ServiceApi for WildcardClient {
    fn service_name(&self) -> &'static str {
        "wildcard"
    }

    async fn health(&self) -> ServiceResult<HealthRecord> {
        self.api.get(&["health"]).await
    }
}

#[async_trait]
impl WildcardApi for WildcardClient {
    async fn get_wildcard_suggestion(&self) -> ServiceResult<SuggestedFilm> {
        payload::item(self.api.get(&["api", "suggest"]).await?)
    }

    async fn get_genre_wildcard(&self, genre_id: &str) -> ServiceResult<SuggestedFilm> {
        payload::item(self.api.get(&["api", "suggest", genre_id]).await?)
    }

    async fn get_available_genres(&self) -> ServiceResult<Vec<Genre>> {
        payload::list(self.api.get(&["api", "genres"]).await?)
    }

    async fn test_responsiveness(&self) -> ServiceResult<Value> {
        self.api.get(&["api", "test", "responsiveness"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WildcardClient {
        WildcardClient::new(ApiClient::new(&server.uri(), None).unwrap())
    }

    #[tokio::test]
    async fn test_genre_wildcard_path_and_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/suggest/80"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "film": {"id": 238, "title": "The Godfather", "genre": ["Crime", "Drama"], "releaseYear": 1972}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let film = client.get_genre_wildcard("80").await.unwrap();
        assert_eq!(film.label(), "The Godfather (1972)");
        assert_eq!(film.genre.as_deref(), Some("Crime, Drama"));
    }

    #[tokio::test]
    async fn test_genre_id_cannot_escape_its_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Alien"})))
            .mount(&server)
            .await;
        let client = client_for(&server);

        client.get_genre_wildcard("27/../../admin?x=1").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/api/suggest/27%2F..%2F..%2Fadmin%3Fx=1");
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_genres_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/genres"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 28, "name": "Action"}, {"id": 35, "name": "Comedy"}])),
            )
            .mount(&server)
            .await;
        let client = client_for(&server);

        let genres = client.get_available_genres().await.unwrap();
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].id, "35");
    }

    #[tokio::test]
    async fn test_suggestion_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/suggest"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = client.get_wildcard_suggestion().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }
}
