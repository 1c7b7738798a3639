pub mod catalog;
pub mod config;
pub mod films;
pub mod health;
pub mod progress;
pub mod prompts;
pub mod session;
pub mod watchlist;

use cineflix_config::{Config, CredentialStore, PathManager};
use cineflix_core::FilmTracker;
use cineflix_services::{create_services, Services};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;

/// Flags shared by every command
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub user: Option<String>,
}

impl GlobalOptions {
    pub fn config_file(&self, paths: &PathManager) -> PathBuf {
        self.config.clone().unwrap_or_else(|| paths.config_file())
    }
}

/// Loaded configuration plus the service clients built from it
pub struct AppContext {
    pub config: Config,
    pub services: Services,
}

impl AppContext {
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let paths = PathManager::new().map_err(|e| eyre!("{}", e))?;
        let config = load_config(options, &paths)?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let services = create_services(&config, &credentials)?;
        tracing::debug!(user = %config.user_id, "Services created");

        Ok(Self { config, services })
    }

    pub fn tracker(&self) -> FilmTracker {
        FilmTracker::from_config(self.services.clone(), &self.config)
    }
}

/// Config file (or defaults) with the `--user` override applied, validated
pub fn load_config(options: &GlobalOptions, paths: &PathManager) -> Result<Config> {
    let config_file = options.config_file(paths);
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    if let Some(user) = &options.user {
        config.user_id = user.clone();
    }
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}
