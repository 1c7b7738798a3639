pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, RetryConfig, ServiceEndpoints, SyncConfig, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::{PathManager, CONFIG_DIR_ENV};
