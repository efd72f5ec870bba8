use thiserror::Error;

/// Failures talking to the HR REST backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No response: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("api error {status}: {body}")]
    Status { status: u16, body: String },
    /// The backend answered but the body was not what we expected.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn not_found(what: &str) -> Self {
        BackendError::Status {
            status: 404,
            body: format!("{what} not found"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Network(e.to_string())
        }
    }
}
