use thiserror::Error;

/// Failure taxonomy for remote fetches.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response within the fetch bound.
    #[error("request timed out")]
    Timeout,

    /// Non-2xx response.
    #[error("server returned {status}")]
    Http { status: u16 },

    /// Payload arrived but did not decode.
    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Connection-level failure (DNS, TLS, reset).
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err)
        }
    }
}
