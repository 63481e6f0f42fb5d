//! Error type definitions.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A `Result` alias where the `Err` case is `hubspot_rs::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the HubSpot client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Missing access token or OAuth credentials")]
    MissingCredentials,
    #[error("Invalid token (make sure there are no invalid characters)")]
    InvalidToken,
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error("Http transport error: {0}")]
    Transport(reqwest::Error),
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),
    #[error("user email cannot be changed after creation")]
    EmailImmutable,
    #[error("resource has no stored identifier")]
    MissingIdentifier,
    #[error("retry ceiling exceeded after {elapsed:?}: {source}")]
    RetryTimeout {
        elapsed: Duration,
        source: Box<Error>,
    },
}

impl Error {
    /// Whether the error is worth retrying, i.e. the API told us to slow
    /// down. The check is on the rendered message, which for API errors
    /// always embeds the numeric status.
    pub fn is_retryable(&self) -> bool {
        self.to_string().contains("429")
    }

    /// Whether the error says the addressed user does not exist. Reads use
    /// this to detect out-of-band deletion.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(e) if e.status == 404)
    }
}

/// The client operation an [`ApiError`] was returned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Classification for the status codes the API is known to answer with.
fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad Request"),
        401 => Some("Unauthorized"),
        404 => Some("Not Found"),
        409 => Some("Already Exists"),
        429 => Some("Rate Limited"),
        _ => None,
    }
}

/// A non-success response from the HubSpot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub operation: Operation,
    pub message: Option<&'static str>,
}

impl ApiError {
    pub(crate) fn new(status: u16, operation: Operation) -> Self {
        Self {
            status,
            operation,
            message: status_message(status),
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The status code has to be part of the rendered message, retry
        // classification matches on it.
        if let Some(msg) = self.message {
            write!(
                f,
                "{} failed: {}, status = {}",
                self.operation, msg, self.status
            )
        } else {
            write!(
                f,
                "{} failed: unknown error, status = {}",
                self.operation, self.status
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn api_error_message_embeds_status() {
        let err = ApiError::new(429, Operation::Create);
        assert_eq!(err.to_string(), "create failed: Rate Limited, status = 429");

        let err = ApiError::new(404, Operation::Read);
        assert_eq!(err.to_string(), "read failed: Not Found, status = 404");

        let err = ApiError::new(418, Operation::Delete);
        assert_eq!(err.to_string(), "delete failed: unknown error, status = 418");
    }

    #[test]
    fn retryable_iff_rate_limited() {
        assert!(Error::Api(ApiError::new(429, Operation::Update)).is_retryable());

        assert!(!Error::Api(ApiError::new(400, Operation::Create)).is_retryable());
        assert!(!Error::Api(ApiError::new(401, Operation::Read)).is_retryable());
        assert!(!Error::Api(ApiError::new(404, Operation::Read)).is_retryable());
        assert!(!Error::Api(ApiError::new(409, Operation::Create)).is_retryable());
        assert!(!Error::InvalidEmail("nope".to_string()).is_retryable());
        assert!(!Error::EmailImmutable.is_retryable());
        assert!(!Error::MissingCredentials.is_retryable());
    }

    #[test]
    fn not_found_only_for_404() {
        assert!(Error::Api(ApiError::new(404, Operation::Read)).is_not_found());
        assert!(!Error::Api(ApiError::new(400, Operation::Read)).is_not_found());
        assert!(!Error::EmailImmutable.is_not_found());
    }
}
