//! Blocking client for the Kongregate server API.
//!
//! # Overview
//! One method per remote endpoint on `KongregateClient`. Each endpoint has a
//! `build_*` twin that returns the `HttpRequest` without touching the
//! network, so the wire shape of every call can be inspected.
//!
//! # Design
//! - `KongregateClient` is stateless; it holds only its configuration.
//! - `Transport` performs exactly one attempt per call with bounded connect
//!   and total timeouts. No retries, no caching.
//! - Every call yields a `Response`. Transport failures and non-2xx statuses
//!   are data on it; only a bad HTTP method or a malformed JSON payload is an
//!   `ApiError`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use client::KongregateClient;
pub use config::{ClientConfig, KONGREGATE_API_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest};
pub use response::{ParsedBody, Response};
pub use transport::Transport;
pub use types::{Character, Guild, PrivateMessage, SharedLink, UserQuery, UsersQuery};
