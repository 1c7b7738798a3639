use crate::error::{ServiceError, ServiceResult};
use crate::http::ApiClient;
use crate::traits::MovieSearch;
use async_trait::async_trait;
use cineflix_models::SearchResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// TMDB title search
#[derive(Clone, Debug)]
pub struct TmdbClient {
    api: ApiClient,
    api_key: Option<String>,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(api: ApiClient, api_key: Option<String>, image_base_url: impl Into<String>) -> Self {
        Self {
            api,
            api_key,
            image_base_url: image_base_url.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl MovieSearch for TmdbClient {
    async fn search_movies(&self, query: &str) -> ServiceResult<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::InvalidInput("Search query cannot be empty".to_string()));
        }
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ServiceError::Config("TMDB API key not configured. Run `cineflix config tmdb-key` or set TMDB_API_KEY".to_string())
        })?;

        let response: SearchResponse = self
            .api
            .get_with_query(&["search", "movie"], &[("api_key", api_key), ("query", query)])
            .await?;
        Ok(response.results)
    }

    fn image_base_url(&self) -> String {
        self.image_base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w200";

    #[tokio::test]
    async fn test_search_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "secret"))
            .and(query_param("query", "Arrival"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [{
                    "id": 329865,
                    "title": "Arrival",
                    "release_date": "2016-11-10",
                    "poster_path": "/a.jpg",
                    "overview": "Aliens."
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = TmdbClient::new(
            ApiClient::new(&server.uri(), None).unwrap(),
            Some("secret".to_string()),
            IMAGE_BASE,
        );

        let results = client.search_movies("Arrival").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].release_year(), Some(2016));
        assert_eq!(client.image_base_url(), IMAGE_BASE);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_locally() {
        let client = TmdbClient::new(
            ApiClient::new("http://127.0.0.1:9", None).unwrap(),
            Some("secret".to_string()),
            IMAGE_BASE,
        );

        let err = client.search_movies("   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = TmdbClient::new(ApiClient::new("http://127.0.0.1:9", None).unwrap(), None, IMAGE_BASE);

        let err = client.search_movies("Heat").await.unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
        assert!(!client.has_api_key());
    }
}
