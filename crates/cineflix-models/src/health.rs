use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Anything a service reports other than "healthy"
    #[default]
    #[serde(other)]
    Unhealthy,
}

/// Health snapshot of one service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    #[serde(default)]
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HealthRecord {
    pub fn healthy(timestamp: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
            timestamp: Some(timestamp.into()),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
            timestamp: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Health of every known service keyed by service name; replaced wholesale on each poll
///
/// Iteration and serialization are alphabetical by service name, whatever the poll order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct HealthReport {
    services: BTreeMap<String, HealthRecord>,
}

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, service: impl Into<String>, record: HealthRecord) {
        self.services.insert(service.into(), record);
    }

    pub fn get(&self, service: &str) -> Option<&HealthRecord> {
        self.services.get(service)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HealthRecord)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn healthy_count(&self) -> usize {
        self.services.values().filter(|r| r.is_healthy()).count()
    }

    pub fn unhealthy_services(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|(_, r)| !r.is_healthy())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn all_healthy(&self) -> bool {
        self.services.values().all(HealthRecord::is_healthy)
    }
}
