//! Builds the service clients from configuration.

use crate::clients::{RecommendationClient, SortingClient, TmdbClient, WatchlistClient, WildcardClient};
use crate::error::ServiceResult;
use crate::health::HealthMonitor;
use crate::http::ApiClient;
use crate::traits::{MovieSearch, RecommendationApi, ServiceApi, SortingApi, WatchlistApi, WildcardApi};
use cineflix_config::{Config, CredentialStore};
use std::sync::Arc;
use tracing::debug;

/// Every client the application talks to, plus a health monitor over the four microservices
#[derive(Clone)]
pub struct Services {
    pub recommendation: Arc<dyn RecommendationApi>,
    pub watchlist: Arc<dyn WatchlistApi>,
    pub sorting: Arc<dyn SortingApi>,
    pub wildcard: Arc<dyn WildcardApi>,
    pub search: Arc<dyn MovieSearch>,
    pub health: HealthMonitor,
}

pub fn create_services(config: &Config, credentials: &CredentialStore) -> ServiceResult<Services> {
    let timeout = config.services.request_timeout();

    let recommendation = Arc::new(RecommendationClient::new(ApiClient::new(
        &config.services.recommendation,
        timeout,
    )?));
    let watchlist = Arc::new(WatchlistClient::new(ApiClient::new(&config.services.watchlist, timeout)?));
    let sorting = Arc::new(SortingClient::new(ApiClient::new(&config.services.sorting, timeout)?));
    let wildcard = Arc::new(WildcardClient::new(ApiClient::new(&config.services.wildcard, timeout)?));

    let api_key = credentials.resolve_tmdb_api_key();
    if api_key.is_none() {
        debug!("No TMDB API key configured, film search disabled");
    }
    let search = Arc::new(TmdbClient::new(
        ApiClient::new(&config.tmdb.base_url, timeout)?,
        api_key,
        config.tmdb.image_base_url.clone(),
    ));

    // Same clients seen through their common health surface
    let health = HealthMonitor::new(vec![
        recommendation.clone() as Arc<dyn ServiceApi>,
        watchlist.clone() as Arc<dyn ServiceApi>,
        sorting.clone() as Arc<dyn ServiceApi>,
        wildcard.clone() as Arc<dyn ServiceApi>,
    ]);

    Ok(Services {
        recommendation,
        watchlist,
        sorting,
        wildcard,
        search,
        health,
    })
}
