use super::prompts::prompt_secret;
use super::{load_config, GlobalOptions};
use crate::output::Output;
use cineflix_config::{Config, CredentialStore, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, options: &GlobalOptions, output: &Output) -> Result<()> {
    let paths = PathManager::new().map_err(|e| eyre!("{}", e))?;
    match cmd {
        crate::ConfigCommands::Show => show_config(options, &paths, output),
        crate::ConfigCommands::Init { force } => init_config(force, options, &paths, output),
        crate::ConfigCommands::TmdbKey { key } => set_tmdb_key(key, &paths, output),
    }
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

fn show_config(options: &GlobalOptions, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = options.config_file(paths);
    let config = load_config(options, paths)?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let tmdb_key = credentials.resolve_tmdb_api_key();

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "config": config,
            "tmdb_api_key_set": tmdb_key.is_some(),
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}, showing defaults (run 'cineflix config init' to write one)",
            config_file.display()
        ));
    }

    let mut general = section("General");
    general.add_row(vec!["Config file".to_string(), config_file.display().to_string()]);
    general.add_row(vec!["User".to_string(), config.user_id.clone()]);
    println!("{}", general);

    let mut services = section("Services");
    for (name, url) in config.services.named() {
        services.add_row(vec![name, url]);
    }
    let timeout = match config.services.request_timeout() {
        Some(timeout) => format!("{}s", timeout.as_secs()),
        None => "none".to_string(),
    };
    services.add_row(vec!["request timeout".to_string(), timeout]);
    println!("{}", services);

    let mut tmdb = section("TMDB");
    tmdb.add_row(vec!["Base URL", config.tmdb.base_url.as_str()]);
    tmdb.add_row(vec!["Image base URL", config.tmdb.image_base_url.as_str()]);
    tmdb.add_row(vec![
        "API key".to_string(),
        tmdb_key.as_deref().map(mask_string).unwrap_or_else(|| "<not set>".to_string()),
    ]);
    println!("{}", tmdb);

    let mut behaviour = section("Retry and sync");
    behaviour.add_row(vec!["Max attempts".to_string(), config.retry.max_attempts.to_string()]);
    behaviour.add_row(vec!["Initial delay".to_string(), format!("{} ms", config.retry.initial_delay_ms)]);
    behaviour.add_row(vec![
        "Recommendation threshold".to_string(),
        format!("{} rated films", config.sync.recommendation_threshold),
    ]);
    behaviour.add_row(vec![
        "Recommendation count".to_string(),
        config.sync.recommendation_count.to_string(),
    ]);
    println!("{}", behaviour);

    Ok(())
}

fn init_config(force: bool, options: &GlobalOptions, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = options.config_file(paths);
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    let mut config = Config::default();
    if let Some(user) = &options.user {
        config.user_id = user.clone();
    }
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    Ok(())
}

fn set_tmdb_key(key: Option<String>, paths: &PathManager, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompt_secret("TMDB API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("TMDB API key cannot be empty"));
    }

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    credentials.set_tmdb_api_key(key);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("TMDB API key saved");
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }
}
