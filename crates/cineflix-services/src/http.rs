use crate::error::{ServiceError, ServiceResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// JSON-over-HTTP wrapper shared by all service clients
///
/// Paths are given as segments and percent-encoded one by one, so an id
/// can never reach another endpoint. Every non-2xx status becomes
/// [`ServiceError::Status`]; an empty body decodes as JSON `null`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ServiceResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ServiceError::Config(format!("Invalid service URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::Config(format!(
                "Service URL '{}' cannot carry a path",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL with `segments` appended, each one encoded on its own
    pub fn url(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::Config(format!("Service URL '{}' cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one request and return the decoded JSON body
    pub async fn call(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> ServiceResult<Value> {
        let url = self.url(path)?;
        debug!(%method, %url, "Sending request");

        let result = self.execute(method.clone(), url.clone(), query, body).await;
        if let Err(ref e) = result {
            warn!(%method, %url, error = %e, "API call failed");
        }
        result
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> ServiceResult<Value> {
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ServiceError::transport)?;
        let status = response.status();
        let text = response.text().await.map_err(ServiceError::transport)?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> ServiceResult<T> {
        decode(self.call(Method::GET, path, &[], None).await?)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> ServiceResult<T> {
        decode(self.call(Method::GET, path, query, None).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &[&str], body: &B) -> ServiceResult<T> {
        decode(self.call(Method::POST, path, &[], Some(encode(body)?)).await?)
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &[&str]) -> ServiceResult<T> {
        decode(self.call(Method::POST, path, &[], None).await?)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &[&str], body: &B) -> ServiceResult<T> {
        decode(self.call(Method::PATCH, path, &[], Some(encode(body)?)).await?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &[&str]) -> ServiceResult<T> {
        decode(self.call(Method::DELETE, path, &[], None).await?)
    }
}

fn encode<B: Serialize>(body: &B) -> ServiceResult<Value> {
    serde_json::to_value(body).map_err(|e| ServiceError::InvalidInput(format!("Unserializable request body: {}", e)))
}

fn decode<T: DeserializeOwned>(value: Value) -> ServiceResult<T> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Port 9 (discard) has no listener on test machines
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn test_post_sends_json_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/things"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({"count": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let value: Value = client.post(&["api", "things"], &json!({"count": 5})).await.unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string(r#"{"error": "down"}"#))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let err = client.get::<Value>(&["health"]).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(
            err,
            ServiceError::Status {
                status: 503,
                body: r#"{"error": "down"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/watchlist/user1/films/9"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let value: Value = client
            .delete(&["api", "watchlist", "user1", "films", "9"])
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let err = client.get::<Value>(&["api", "trending"]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = ApiClient::new(UNREACHABLE, None).unwrap();

        let err = client.get::<Value>(&["health"]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_query_parameters_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", "the thing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let _: Value = client
            .get_with_query(&["search", "movie"], &[("query", "the thing")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reserved_characters_stay_inside_their_segment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let _: Value = client
            .delete(&["api", "watchlist", "user1", "films", "a/b?c#d"])
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/api/watchlist/user1/films/a%2Fb%3Fc%23d");
        assert_eq!(requests[0].url.query(), None);
    }

    #[test]
    fn test_url_joins_segments_onto_base() {
        let client = ApiClient::new("http://localhost:3001/", None).unwrap();
        assert_eq!(client.url(&["health"]).unwrap().as_str(), "http://localhost:3001/health");

        let client = ApiClient::new("https://api.themoviedb.org/3", None).unwrap();
        assert_eq!(
            client.url(&["search", "movie"]).unwrap().as_str(),
            "https://api.themoviedb.org/3/search/movie"
        );
        assert_eq!(
            client.url(&["api", "suggest", "../admin"]).unwrap().as_str(),
            "https://api.themoviedb.org/3/api/suggest/..%2Fadmin"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(ApiClient::new("localhost:3001", None), Err(ServiceError::Config(_))));
        assert!(matches!(ApiClient::new("not a url", None), Err(ServiceError::Config(_))));
    }
}
