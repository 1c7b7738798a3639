use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub services: ServiceEndpoints,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Base URLs of the four backend microservices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceEndpoints {
    #[serde(default = "default_recommendation_url")]
    pub recommendation: String,
    #[serde(default = "default_watchlist_url")]
    pub watchlist: String,
    #[serde(default = "default_sorting_url")]
    pub sorting: String,
    #[serde(default = "default_wildcard_url")]
    pub wildcard: String,
    /// Per-request timeout in seconds, 0 disables it
    #[serde(default)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    /// Rated films needed before recommendations are fetched
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: usize,
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: u32,
}

fn default_user_id() -> String {
    "user1".to_string()
}

fn default_recommendation_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_watchlist_url() -> String {
    "http://localhost:3002".to_string()
}

fn default_sorting_url() -> String {
    "http://localhost:3003".to_string()
}

fn default_wildcard_url() -> String {
    "http://localhost:3004".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w200".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_recommendation_threshold() -> usize {
    5
}

fn default_recommendation_count() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            services: ServiceEndpoints::default(),
            tmdb: TmdbConfig::default(),
            retry: RetryConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            recommendation: default_recommendation_url(),
            watchlist: default_watchlist_url(),
            sorting: default_sorting_url(),
            wildcard: default_wildcard_url(),
            request_timeout_secs: 0,
        }
    }
}

impl ServiceEndpoints {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// (service name, base url) pairs in polling order
    pub fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("recommendation", self.recommendation.as_str()),
            ("watchlist", self.watchlist.as_str()),
            ("sorting", self.sorting.as_str()),
            ("wildcard", self.wildcard.as_str()),
        ]
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            recommendation_threshold: default_recommendation_threshold(),
            recommendation_count: default_recommendation_count(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(anyhow::anyhow!("user_id cannot be empty"));
        }

        for (name, url) in self.services.named() {
            if !is_http_url(url) {
                return Err(anyhow::anyhow!("Invalid URL for {} service: {}", name, url));
            }
        }

        if !is_http_url(&self.tmdb.base_url) {
            return Err(anyhow::anyhow!("Invalid TMDB base_url: {}", self.tmdb.base_url));
        }

        if self.retry.max_attempts == 0 {
            return Err(anyhow::anyhow!("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}
