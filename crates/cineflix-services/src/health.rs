use crate::traits::ServiceApi;
use chrono::{SecondsFormat, Utc};
use cineflix_models::{HealthRecord, HealthReport};
use std::sync::Arc;
use tracing::{debug, warn};

/// Polls every registered service's health endpoint
#[derive(Clone, Default)]
pub struct HealthMonitor {
    services: Vec<Arc<dyn ServiceApi>>,
}

impl HealthMonitor {
    pub fn new(services: Vec<Arc<dyn ServiceApi>>) -> Self {
        Self { services }
    }

    pub fn with_service(mut self, service: Arc<dyn ServiceApi>) -> Self {
        self.services.push(service);
        self
    }

    pub fn service_names(&self) -> Vec<&'static str> {
        self.services.iter().map(|s| s.service_name()).collect()
    }

    /// One request per service, sequentially; a failing service never aborts the poll
    pub async fn check_all(&self) -> HealthReport {
        let mut report = HealthReport::new();

        for service in &self.services {
            let name = service.service_name();
            let record = match service.health().await {
                Ok(mut record) => {
                    if record.timestamp.is_none() {
                        record.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
                    }
                    debug!(service = name, status = ?record.status, "Health check completed");
                    record
                }
                Err(e) => {
                    warn!(service = name, error = %e, "Health check failed");
                    HealthRecord::unhealthy(e.to_string())
                }
            };
            report.insert(name, record);
        }

        report
    }
}

pub fn is_service_healthy(record: Option<&HealthRecord>) -> bool {
    record.map(HealthRecord::is_healthy).unwrap_or(false)
}
