//! The uniform value returned by every endpoint call.

use serde_json::Value;

use crate::error::ApiError;

/// Outcome of one HTTP round-trip.
///
/// `status_code` is 0 and `raw_body` empty when the transport failed before a
/// response arrived. A non-2xx status is not an error by itself; check
/// `success()` and `has_error()` separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    raw_body: String,
    content_type: Option<String>,
    transport_error: String,
}

/// Decoded payload of a `Response`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Text(String),
    Json(Value),
}

impl Response {
    pub fn new(status_code: u16, raw_body: String, content_type: Option<String>) -> Self {
        Self {
            status_code,
            raw_body,
            content_type,
            transport_error: String::new(),
        }
    }

    /// A response for a request that never produced an HTTP reply.
    pub fn failed(transport_error: String) -> Self {
        Self::new(0, String::new(), None).with_transport_error(transport_error)
    }

    /// Attach a transport failure description.
    pub(crate) fn with_transport_error(mut self, error: String) -> Self {
        self.transport_error = error;
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn transport_error(&self) -> &str {
        &self.transport_error
    }

    /// True when the server received, understood and accepted the request.
    pub fn success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }

    pub fn has_error(&self) -> bool {
        !self.transport_error.is_empty()
    }

    /// Decode the body according to the declared content type.
    ///
    /// Anything not declared as `application/json` is returned as text.
    pub fn parsed_body(&self) -> Result<ParsedBody, ApiError> {
        match self.content_type.as_deref() {
            Some(ct) if ct.contains("application/json") => serde_json::from_str(&self.raw_body)
                .map(ParsedBody::Json)
                .map_err(ApiError::MalformedPayload),
            _ => Ok(ParsedBody::Text(self.raw_body.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_is_exactly_the_2xx_range() {
        for status in 0..600u16 {
            let response = Response::new(status, String::new(), None);
            assert_eq!(response.success(), (200..=299).contains(&status), "status {status}");
        }
    }

    #[test]
    fn has_error_tracks_transport_error() {
        let ok = Response::new(500, "oops".to_string(), None);
        assert!(!ok.has_error());
        assert_eq!(ok.transport_error(), "");

        let failed = Response::failed("connection refused".to_string());
        assert!(failed.has_error());
        assert_eq!(failed.status_code(), 0);
        assert_eq!(failed.raw_body(), "");
        assert_eq!(failed.content_type(), None);
    }

    #[test]
    fn parsed_body_decodes_json() {
        let response = Response::new(
            200,
            r#"{"a":1}"#.to_string(),
            Some("application/json; charset=utf-8".to_string()),
        );
        assert_eq!(response.parsed_body().unwrap(), ParsedBody::Json(json!({"a": 1})));
    }

    #[test]
    fn parsed_body_without_content_type_is_identity() {
        let response = Response::new(200, r#"{"a":1}"#.to_string(), None);
        assert_eq!(
            response.parsed_body().unwrap(),
            ParsedBody::Text(r#"{"a":1}"#.to_string())
        );
    }

    #[test]
    fn parsed_body_keeps_other_media_types_as_text() {
        let response = Response::new(200, "<p>hi</p>".to_string(), Some("text/html".to_string()));
        assert_eq!(
            response.parsed_body().unwrap(),
            ParsedBody::Text("<p>hi</p>".to_string())
        );
    }

    #[test]
    fn parsed_body_rejects_malformed_json() {
        let response = Response::new(200, "not json".to_string(), Some("application/json".to_string()));
        let err = response.parsed_body().unwrap_err();
        assert!(matches!(err, ApiError::MalformedPayload(_)));
    }

    #[test]
    fn error_status_parses_like_any_other() {
        let response = Response::new(
            403,
            r#"{"success":false,"error":403}"#.to_string(),
            Some("application/json".to_string()),
        );
        assert!(!response.success());
        assert!(!response.has_error());
        assert_eq!(
            response.parsed_body().unwrap(),
            ParsedBody::Json(json!({"success": false, "error": 403}))
        );
    }
}
