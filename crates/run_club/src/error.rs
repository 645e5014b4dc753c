//! Error types for the run-club tracker.

use strava_client::StravaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunClubError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Fetch(#[from] StravaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RunClubError {
    /// Process exit status for this failure. Every failure is fatal and
    /// reported the same way.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias for run-club operations.
pub type RunClubResult<T> = Result<T, RunClubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_keeps_status_and_body() {
        let err: RunClubError = StravaError::from_status(500, "upstream down".into()).into();
        assert_eq!(err.to_string(), "error fetching activities: 500: upstream down");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn config_error_is_shown_verbatim() {
        let err = RunClubError::Config("Access token is required".into());
        assert_eq!(err.to_string(), "Access token is required");
    }
}
