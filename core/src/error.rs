//! Error types for the Kongregate API client.
//!
//! # Design
//! Only programmer errors and payload problems are errors. Transport failures
//! and non-2xx statuses travel as data on `Response` so every endpoint call
//! hands the caller one value to inspect.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP method is not one of GET, POST, PUT or DELETE. Raised before
    /// any network activity.
    #[error("method '{0}' not allowed")]
    InvalidMethod(String),

    /// A response declared as JSON could not be parsed.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_method_names_the_method() {
        let err = ApiError::InvalidMethod("PATCH".to_string());
        assert_eq!(err.to_string(), "method 'PATCH' not allowed");
    }

    #[test]
    fn malformed_payload_keeps_parser_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::MalformedPayload(source);
        assert!(err.to_string().starts_with("malformed payload: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
