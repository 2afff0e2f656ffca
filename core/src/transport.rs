//! Blocking HTTP transport.
//!
//! # Design
//! One call, one request, one fresh agent. ureq is configured to hand back
//! 3xx, 4xx and 5xx replies as ordinary responses without following
//! redirects, and to read bodies of any size, so the only failures that reach the
//! `Err` arm are connection, DNS, TLS and timeout problems. Those are folded
//! into `Response::transport_error` instead of being returned as errors.

use std::time::Duration;

use log::{debug, warn};
use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::Response;

/// Executes `HttpRequest`s with bounded connect and total timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    timeout: Duration,
    connect_timeout: Duration,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
        }
    }

    /// Execute a request from loosely typed parts.
    ///
    /// Fails with `InvalidMethod` before any I/O when `method` is not one of
    /// GET, POST, PUT or DELETE. Every other outcome is a `Response`.
    pub fn execute(
        &self,
        url: &str,
        method: &str,
        body: Option<&str>,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<Response, ApiError> {
        let method: HttpMethod = method.parse()?;
        let request = HttpRequest {
            method,
            url: url.to_string(),
            query: query.to_vec(),
            headers: headers.to_vec(),
            body: body.map(str::to_string),
        };
        Ok(self.send(&request))
    }

    /// Execute an already validated request.
    pub fn send(&self, request: &HttpRequest) -> Response {
        let url = request.full_url();
        debug!("{} {url}", request.method);

        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_connect(Some(self.connect_timeout))
            .timeout_global(Some(self.timeout))
            .build()
            .new_agent();

        let body = if request.method.sends_body() {
            request.body.as_deref()
        } else {
            None
        };

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(&url), &request.headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(&url), &request.headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(agent.post(&url), &request.headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(agent.put(&url), &request.headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {url} failed: {e}", request.method);
                return Response::failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!("{} {url} -> {status}", request.method);

        match response.body_mut().with_config().limit(u64::MAX).read_to_string() {
            Ok(body) => Response::new(status, body, content_type),
            Err(e) => {
                warn!("{} {url} body read failed: {e}", request.method);
                Response::new(status, String::new(), content_type).with_transport_error(e.to_string())
            }
        }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(&ClientConfig::default())
    }

    #[test]
    fn invalid_method_fails_before_any_io() {
        // An unroutable URL proves no connection is attempted.
        let err = transport()
            .execute("http://invalid.invalid/", "PATCH", None, &[], &[])
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidMethod(ref m) if m == "PATCH"));
    }

    #[test]
    fn takes_timeouts_from_config() {
        let config = ClientConfig {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..ClientConfig::default()
        };
        let transport = Transport::new(&config);
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn refused_connection_becomes_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = transport()
            .execute(&format!("http://{addr}/badges.json"), "GET", None, &[], &[])
            .unwrap();
        assert!(response.has_error());
        assert!(!response.success());
        assert_eq!(response.status_code(), 0);
        assert_eq!(response.raw_body(), "");
    }
}
