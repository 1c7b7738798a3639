use thiserror::Error;

/// Failure of a call to one of the backend services
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// Service unreachable or the connection broke mid-request
    #[error("Failed to reach service: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response payload: {0}")]
    Decode(String),

    /// 2xx response whose payload reports a failure
    #[error("{0}")]
    Application(String),

    /// Rejected locally before any request was made
    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Transport(_) => true,
            ServiceError::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
