use crate::film::FilmYear;
use crate::suggestion::SuggestedFilm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A film the user wants to watch; status transitions are owned by the watchlist service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub genre: String,
    #[serde(default, deserialize_with = "crate::de::film_year")]
    pub release_year: FilmYear,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default)]
    pub status: WatchlistStatus,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub added_at: String,
}

/// Body of an "add to watchlist" request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub genre: String,
    pub release_year: FilmYear,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl NewWatchlistEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            genre: "Unknown".to_string(),
            release_year: FilmYear::default(),
            description: None,
            poster: None,
        }
    }
}

impl From<&SuggestedFilm> for NewWatchlistEntry {
    fn from(film: &SuggestedFilm) -> Self {
        Self {
            id: film.id.clone(),
            title: film.title.clone(),
            genre: film.genre.clone().unwrap_or_else(|| "Unknown".to_string()),
            release_year: film.release_year.clone().unwrap_or_default(),
            description: film.description.clone(),
            poster: film.poster.clone(),
        }
    }
}

/// Watchlist status; unknown server values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum WatchlistStatus {
    #[default]
    WantToWatch,
    Watching,
    Watched,
    Other(String),
}

impl WatchlistStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WatchlistStatus::WantToWatch => "want_to_watch",
            WatchlistStatus::Watching => "watching",
            WatchlistStatus::Watched => "watched",
            WatchlistStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for WatchlistStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "want_to_watch" => WatchlistStatus::WantToWatch,
            "watching" => WatchlistStatus::Watching,
            "watched" => WatchlistStatus::Watched,
            _ => WatchlistStatus::Other(value),
        }
    }
}

impl From<&str> for WatchlistStatus {
    fn from(value: &str) -> Self {
        WatchlistStatus::from(value.to_string())
    }
}

impl From<WatchlistStatus> for String {
    fn from(status: WatchlistStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for WatchlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
