pub use reqwest::StatusCode;

/// Message shown when the provider rejects a city.
pub const CITY_NOT_FOUND: &str = "City not found. Please try again.";

/// Why a weather fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Provider answered with a non-success status.
    #[error("provider responded with status {status}")]
    NotFound { status: StatusCode },

    /// Transport-level failure: connect, DNS, timeout or an unreadable body.
    #[error("network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Text suitable for the display's error line.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NotFound { .. } => CITY_NOT_FOUND.to_string(),
            FetchError::Network(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
