//! HTTP request types as plain data.
//!
//! # Design
//! Every endpoint first produces an `HttpRequest` value and only then hands it
//! to the transport. Building is pure, so the exact wire shape of each
//! endpoint (path, query, body, headers) can be checked without a network.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the request body is transmitted for this method.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ApiError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` carries no query string; `query` pairs are encoded by `full_url`
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST carrying a JSON document.
    pub fn post_json(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            query: Vec::new(),
            headers: vec![("Content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The URL with the form-encoded query string appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{encoded}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_four_supported_methods() {
        for (raw, method) in [
            ("GET", HttpMethod::Get),
            ("POST", HttpMethod::Post),
            ("PUT", HttpMethod::Put),
            ("DELETE", HttpMethod::Delete),
        ] {
            assert_eq!(raw.parse::<HttpMethod>().unwrap(), method);
            assert_eq!(method.as_str(), raw);
        }
    }

    #[test]
    fn rejects_other_methods() {
        for raw in ["PATCH", "HEAD", "OPTIONS", "get", ""] {
            let err = raw.parse::<HttpMethod>().unwrap_err();
            assert!(matches!(err, ApiError::InvalidMethod(ref m) if m == raw));
        }
    }

    #[test]
    fn only_post_and_put_send_a_body() {
        assert!(HttpMethod::Post.sends_body());
        assert!(HttpMethod::Put.sends_body());
        assert!(!HttpMethod::Get.sends_body());
        assert!(!HttpMethod::Delete.sends_body());
    }

    #[test]
    fn full_url_without_query_is_unchanged() {
        let req = HttpRequest::get("https://api.kongregate.com/badges.json".to_string());
        assert_eq!(req.full_url(), "https://api.kongregate.com/badges.json");
    }

    #[test]
    fn full_url_encodes_query_in_order() {
        let req = HttpRequest::get("http://host/api/items.json".to_string()).with_query(vec![
            ("api_key".to_string(), "a b&c".to_string()),
            ("tags".to_string(), "sword,shield".to_string()),
        ]);
        assert_eq!(
            req.full_url(),
            "http://host/api/items.json?api_key=a+b%26c&tags=sword%2Cshield"
        );
    }

    #[test]
    fn full_url_appends_to_existing_query() {
        let req = HttpRequest::get("http://host/x?a=1".to_string())
            .with_query(vec![("b".to_string(), "2".to_string())]);
        assert_eq!(req.full_url(), "http://host/x?a=1&b=2");
    }

    #[test]
    fn post_json_sets_content_type() {
        let req = HttpRequest::post_json("http://host/x".to_string(), "{}".to_string());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("Content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
    }
}
