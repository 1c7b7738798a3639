use serde::{Deserialize, Serialize};

/// When the watchlist service should notify about a release
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPreferences {
    pub timing: String,
    pub enabled: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            timing: "day_of_release".to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, deserialize_with = "crate::de::optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub message: String,
    #[serde(default, alias = "title")]
    pub film_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
}
