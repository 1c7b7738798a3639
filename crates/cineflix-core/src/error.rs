use cineflix_services::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Please enter both film title and theater visit date.")]
    MissingFields,

    #[error("Please enter a film title to search.")]
    EmptyQuery,

    #[error("Film not found: {0}")]
    FilmNotFound(String),

    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(u8),

    #[error("No action is awaiting confirmation")]
    NothingPending,

    #[error("No search result at position {0}")]
    NoSuchResult(usize),

    /// A user-initiated call to a backend service failed
    #[error("{service} request failed: {source}")]
    Service {
        service: &'static str,
        #[source]
        source: ServiceError,
    },
}

impl TrackerError {
    pub fn service(service: &'static str, source: ServiceError) -> Self {
        TrackerError::Service { service, source }
    }

    /// Message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Service { service, source } => match source {
                ServiceError::Transport(_) | ServiceError::Status { .. } => {
                    format!("{} service is currently unavailable. Please try again later.", service)
                }
                other => other.to_string(),
            },
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_service_message() {
        let err = TrackerError::service("Watchlist", ServiceError::Transport("connection refused".into()));
        assert_eq!(
            err.user_message(),
            "Watchlist service is currently unavailable. Please try again later."
        );

        let err = TrackerError::service(
            "Wildcard",
            ServiceError::Status {
                status: 503,
                body: String::new(),
            },
        );
        assert_eq!(
            err.user_message(),
            "Wildcard service is currently unavailable. Please try again later."
        );
    }

    #[test]
    fn test_application_failure_keeps_service_message() {
        let err = TrackerError::service("Watchlist", ServiceError::Application("Film already in watchlist".into()));
        assert_eq!(err.user_message(), "Film already in watchlist");
        assert_eq!(TrackerError::MissingFields.user_message(), "Please enter both film title and theater visit date.");
    }
}
