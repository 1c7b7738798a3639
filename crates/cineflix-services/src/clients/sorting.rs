use crate::error::ServiceResult;
use crate::http::ApiClient;
use crate::payload::{self, FilmCollection};
use crate::traits::{ServiceApi, SortingApi};
use async_trait::async_trait;
use cineflix_models::{CollectionType, FilterCriteria, HealthRecord, RemoteFilm, SortCriteria, SortOrder};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortBody {
    criteria: SortCriteria,
    order: SortOrder,
    film_type: CollectionType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterBody<'a> {
    filters: &'a FilterCriteria,
    film_type: CollectionType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortAndFilterBody<'a> {
    sort_criteria: SortCriteria,
    sort_order: SortOrder,
    filters: &'a FilterCriteria,
    film_type: CollectionType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionBody<'a> {
    watched_films: &'a [RemoteFilm],
    watchlist_films: &'a [RemoteFilm],
}

/// Client for the sorting/filtering service, which also stores the user's collections
#[derive(Clone, Debug)]
pub struct SortingClient {
    api: ApiClient,
}

impl SortingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ServiceApi for SortingClient {
    fn service_name(&self) -> &'static str {
        "sorting"
    }

    async fn health(&self) -> ServiceResult<HealthRecord> {
        self.api.get(&["health"]).await
    }
}

#[async_trait]
impl SortingApi for SortingClient {
    async fn sort_films(
        &self,
        user_id: &str,
        criteria: SortCriteria,
        order: SortOrder,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>> {
        let body = SortBody {
            criteria,
            order,
            film_type,
        };
        let value: Value = self.api.post(&["api", "films", user_id, "sort"], &body).await?;
        payload::successful_films(value)
    }

    async fn filter_films(
        &self,
        user_id: &str,
        filters: &FilterCriteria,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>> {
        let body = FilterBody { filters, film_type };
        let value: Value = self.api.post(&["api", "films", user_id, "filter"], &body).await?;
        payload::successful_films(value)
    }

    async fn sort_and_filter_films(
        &self,
        user_id: &str,
        criteria: SortCriteria,
        order: SortOrder,
        filters: &FilterCriteria,
        film_type: CollectionType,
    ) -> ServiceResult<Vec<RemoteFilm>> {
        let body = SortAndFilterBody {
            sort_criteria: criteria,
            sort_order: order,
            filters,
            film_type,
        };
        let value: Value = self
            .api
            .post(&["api", "films", user_id, "sort-and-filter"], &body)
            .await?;
        payload::successful_films(value)
    }

    async fn get_film_collection(&self, user_id: &str, film_type: CollectionType) -> ServiceResult<FilmCollection> {
        let path = ["api", "films", user_id];
        let value: Value = match film_type {
            CollectionType::All => self.api.get(&path).await?,
            other => self.api.get_with_query(&path, &[("type", other.as_str())]).await?,
        };
        payload::film_collection(value)
    }

    async fn update_film_collection(
        &self,
        user_id: &str,
        watched: &[RemoteFilm],
        watchlist: &[RemoteFilm],
    ) -> ServiceResult<Value> {
        let body = CollectionBody {
            watched_films: watched,
            watchlist_films: watchlist,
        };
        self.api.post(&["api", "films", user_id], &body).await
    }

    async fn get_filter_options(&self, user_id: &str, film_type: CollectionType) -> ServiceResult<Value> {
        self.api
            .get_with_query(
                &["api", "filters", "options", user_id],
                &[("filmType", film_type.as_str())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SortingClient {
        SortingClient::new(ApiClient::new(&server.uri(), None).unwrap())
    }

    fn films(body: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    #[tokio::test]
    async fn test_sort_request_and_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/films/user1/sort"))
            .and(body_json(json!({"criteria": "rating", "order": "desc", "filmType": "watched"})))
            .respond_with(films(json!({
                "success": true,
                "films": [{"id": "2", "title": "B", "rating": 5}, {"id": "1", "title": "A", "rating": 3}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let films = client
            .sort_films("user1", SortCriteria::Rating, SortOrder::Desc, CollectionType::Watched)
            .await
            .unwrap();
        assert_eq!(films.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_sort_without_success_flag_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(films(json!({"films": []})))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let err = client
            .sort_films("user1", SortCriteria::Title, SortOrder::Asc, CollectionType::Watched)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Application(_)));
    }

    #[tokio::test]
    async fn test_filter_body_omits_unset_criteria() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/films/user1/filter"))
            .and(body_json(json!({"filters": {"genre": "Drama", "minRating": 3}, "filmType": "watched"})))
            .respond_with(films(json!({"success": true, "films": []})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let filters = FilterCriteria {
            genre: Some("Drama".to_string()),
            min_rating: Some(3),
            ..FilterCriteria::default()
        };
        client
            .filter_films("user1", &filters, CollectionType::Watched)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_collection_query_only_when_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/user1"))
            .and(query_param("type", "watched"))
            .respond_with(films(json!({"watchedFilms": [{"id": "5", "title": "Ran"}]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/films/user1"))
            .respond_with(films(json!({"watchedFilms": [], "watchlistFilms": []})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let all = client.get_film_collection("user1", CollectionType::All).await.unwrap();
        assert!(all.watched_films.is_empty());
        let collection = client
            .get_film_collection("user1", CollectionType::Watched)
            .await
            .unwrap();
        assert_eq!(collection.watched_films[0].title, "Ran");
    }

    #[tokio::test]
    async fn test_collection_keeps_records_that_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/user1"))
            .respond_with(films(json!({
                "watchedFilms": [
                    {"id": 1, "title": "Arrival", "rating": 4},
                    {"title": "Heat", "rating": 5}
                ]
            })))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let collection = client
            .get_film_collection("user1", CollectionType::Watched)
            .await
            .unwrap();
        assert_eq!(collection.watched_films.len(), 1);
        assert_eq!(collection.watched_films[0].title, "Arrival");
    }

    #[tokio::test]
    async fn test_update_collection_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/films/user1"))
            .and(body_json(json!({"watchedFilms": [], "watchlistFilms": []})))
            .respond_with(films(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        client.update_film_collection("user1", &[], &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_sort_and_filter_body_and_filter_options_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/films/user1/sort-and-filter"))
            .and(body_json(json!({
                "sortCriteria": "releaseYear",
                "sortOrder": "asc",
                "filters": {"genre": "Drama", "minRating": 4},
                "filmType": "watched"
            })))
            .respond_with(films(json!({"success": true, "films": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/filters/options/user1"))
            .and(query_param("filmType", "watched"))
            .respond_with(films(json!({"genres": ["Drama"], "years": [2016]})))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let filters = FilterCriteria {
            genre: Some("Drama".to_string()),
            min_rating: Some(4),
            max_rating: None,
            year: None,
        };
        let films = client
            .sort_and_filter_films("user1", SortCriteria::Year, SortOrder::Asc, &filters, CollectionType::Watched)
            .await
            .unwrap();
        assert!(films.is_empty());
        let options = client
            .get_filter_options("user1", CollectionType::Watched)
            .await
            .unwrap();
        assert_eq!(options["genres"][0], "Drama");
    }
}
