pub mod clients;
pub mod error;
pub mod factory;
pub mod health;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod payload;
pub mod retry;
pub mod traits;
pub mod transform;

pub use clients::{RecommendationClient, SortingClient, TmdbClient, WatchlistClient, WildcardClient};
pub use error::{ServiceError, ServiceResult};
pub use factory::{create_services, Services};
pub use health::{is_service_healthy, HealthMonitor};
pub use http::ApiClient;
pub use payload::FilmCollection;
pub use retry::{retry_operation, retry_operation_if, RetryOptions};
pub use traits::{MovieSearch, RecommendationApi, ServiceApi, SortingApi, WatchlistApi, WildcardApi};
pub use transform::{from_remote, from_remote_all, to_remote, to_remote_all, watchlist_to_remote};
