//! Endpoint catalog for the Kongregate server API.
//!
//! # Design
//! `KongregateClient` holds only its configuration and carries no mutable
//! state between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a method of the same name that sends it and
//! returns the `Response` untouched. Reads return `Response`; writes return
//! `Result<Response, ApiError>` because encoding the body is fallible.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::response::Response;
use crate::transport::Transport;
use crate::types::{Character, Guild, PrivateMessage, SharedLink, UserQuery, UsersQuery};

/// Blocking, stateless client for the Kongregate server API.
#[derive(Debug, Clone)]
pub struct KongregateClient {
    base_url: String,
    transport: Transport,
}

impl Default for KongregateClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a payload with the game's private API key.
#[derive(Serialize)]
struct Keyed<'a, T: Serialize> {
    api_key: &'a str,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct GuildRef<'a> {
    server_identifier: &'a str,
    guild_identifier: &'a str,
}

#[derive(Serialize)]
struct ItemUse<'a> {
    user_id: u64,
    game_auth_token: &'a str,
    id: u64,
}

#[derive(Serialize)]
struct LinkOwner<'a> {
    user_id: u64,
    game_auth_token: &'a str,
}

fn pair(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Query key carrying the page number for a high-score scope.
fn page_key(scope: &str) -> Option<&'static str> {
    match scope {
        "daily" => Some("today_page"),
        "weekly" => Some("weekly_page"),
        "lifetime" => Some("lifetime_page"),
        _ => None,
    }
}

impl KongregateClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport: Transport::new(&config),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn post<T: Serialize>(&self, path: &str, api_key: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Keyed { api_key, payload })?;
        Ok(HttpRequest::post_json(self.url(path), body))
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    pub fn build_authenticate(&self, user_id: u64, game_auth_token: &str, api_key: &str) -> HttpRequest {
        HttpRequest::get(self.url("api/authenticate.json")).with_query(vec![
            pair("api_key", api_key),
            pair("user_id", user_id),
            pair("game_auth_token", game_auth_token),
        ])
    }

    /// Verify a user's identity from the auth token the game was given.
    pub fn authenticate(&self, user_id: u64, game_auth_token: &str, api_key: &str) -> Response {
        self.transport
            .send(&self.build_authenticate(user_id, game_auth_token, api_key))
    }

    // -----------------------------------------------------------------------
    // Badges
    // -----------------------------------------------------------------------

    pub fn build_badges(&self) -> HttpRequest {
        HttpRequest::get(self.url("badges.json"))
    }

    /// Badge definitions.
    pub fn badges(&self) -> Response {
        self.transport.send(&self.build_badges())
    }

    pub fn build_user_badges(&self, username: &str) -> HttpRequest {
        HttpRequest::get(self.url(&format!("accounts/{username}/badges.json")))
    }

    /// Badges earned by `username`.
    pub fn user_badges(&self, username: &str) -> Response {
        self.transport.send(&self.build_user_badges(username))
    }

    // -----------------------------------------------------------------------
    // High scores
    // -----------------------------------------------------------------------

    /// `scope` is `daily`, `weekly` or `lifetime`. Any other scope is sent
    /// as-is in the path without a page parameter. `page` defaults to 1.
    pub fn build_high_scores(&self, scope: &str, statistic_id: u64, page: Option<u32>) -> HttpRequest {
        let query = page_key(scope)
            .map(|key| vec![pair(key, page.unwrap_or(1))])
            .unwrap_or_default();
        HttpRequest::get(self.url(&format!("api/high_scores/{scope}/{statistic_id}.json"))).with_query(query)
    }

    pub fn high_scores(&self, scope: &str, statistic_id: u64, page: Option<u32>) -> Response {
        self.transport
            .send(&self.build_high_scores(scope, statistic_id, page))
    }

    pub fn build_friends_high_scores(&self, statistic_id: u64, user_id: u64) -> HttpRequest {
        HttpRequest::get(self.url(&format!(
            "api/high_scores/friends/{statistic_id}/{user_id}.json"
        )))
    }

    /// High scores of `user_id`'s friends for one statistic.
    pub fn friends_high_scores(&self, statistic_id: u64, user_id: u64) -> Response {
        self.transport
            .send(&self.build_friends_high_scores(statistic_id, user_id))
    }

    // -----------------------------------------------------------------------
    // Guilds and characters
    // -----------------------------------------------------------------------

    pub fn build_create_guild(&self, api_key: &str, guild: &Guild) -> Result<HttpRequest, ApiError> {
        self.post("api/guilds.json", api_key, guild)
    }

    /// Create or update a guild definition.
    pub fn create_guild(&self, api_key: &str, guild: &Guild) -> Result<Response, ApiError> {
        Ok(self.transport.send(&self.build_create_guild(api_key, guild)?))
    }

    /// `server_identifier` defaults to "Default".
    pub fn build_destroy_guild(
        &self,
        api_key: &str,
        guild_identifier: &str,
        server_identifier: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let guild = GuildRef {
            server_identifier: server_identifier.unwrap_or("Default"),
            guild_identifier,
        };
        self.post("api/guilds.json", api_key, &guild)
    }

    pub fn destroy_guild(
        &self,
        api_key: &str,
        guild_identifier: &str,
        server_identifier: Option<&str>,
    ) -> Result<Response, ApiError> {
        let request = self.build_destroy_guild(api_key, guild_identifier, server_identifier)?;
        Ok(self.transport.send(&request))
    }

    pub fn build_upsert_character(&self, api_key: &str, character: &Character) -> Result<HttpRequest, ApiError> {
        self.post("api/characters.json", api_key, character)
    }

    /// Create or update a character for use with guilds.
    pub fn upsert_character(&self, api_key: &str, character: &Character) -> Result<Response, ApiError> {
        Ok(self
            .transport
            .send(&self.build_upsert_character(api_key, character)?))
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Item definitions, filtered to `tags` when any are given.
    pub fn build_items(&self, api_key: &str, tags: &[&str]) -> HttpRequest {
        let mut query = vec![pair("api_key", api_key)];
        if !tags.is_empty() {
            query.push(pair("tags", tags.join(",")));
        }
        HttpRequest::get(self.url("api/items.json")).with_query(query)
    }

    pub fn items(&self, api_key: &str, tags: &[&str]) -> Response {
        self.transport.send(&self.build_items(api_key, tags))
    }

    pub fn build_user_items(&self, api_key: &str, user_id: u64) -> HttpRequest {
        HttpRequest::get(self.url("api/user_items.json"))
            .with_query(vec![pair("api_key", api_key), pair("user_id", user_id)])
    }

    /// A user's inventory.
    pub fn user_items(&self, api_key: &str, user_id: u64) -> Response {
        self.transport.send(&self.build_user_items(api_key, user_id))
    }

    pub fn build_use_item(
        &self,
        api_key: &str,
        user_id: u64,
        game_auth_token: &str,
        item_id: u64,
    ) -> Result<HttpRequest, ApiError> {
        let item = ItemUse {
            user_id,
            game_auth_token,
            id: item_id,
        };
        self.post("api/use_item.json", api_key, &item)
    }

    /// Consume the item instance `item_id` from the user's inventory.
    pub fn use_item(
        &self,
        api_key: &str,
        user_id: u64,
        game_auth_token: &str,
        item_id: u64,
    ) -> Result<Response, ApiError> {
        let request = self.build_use_item(api_key, user_id, game_auth_token, item_id)?;
        Ok(self.transport.send(&request))
    }

    // -----------------------------------------------------------------------
    // Kongpanions
    // -----------------------------------------------------------------------

    pub fn build_kongpanions(&self) -> HttpRequest {
        HttpRequest::get(self.url("api/kongpanions/index.json"))
    }

    pub fn kongpanions(&self) -> Response {
        self.transport.send(&self.build_kongpanions())
    }

    /// One of `username` or `user_id` is expected.
    pub fn build_user_kongpanions(&self, username: Option<&str>, user_id: Option<u64>) -> HttpRequest {
        let mut query = Vec::new();
        if let Some(username) = username.filter(|name| !name.is_empty()) {
            query.push(pair("username", username));
        }
        if let Some(user_id) = user_id {
            query.push(pair("user_id", user_id));
        }
        HttpRequest::get(self.url("api/kongpanions.json")).with_query(query)
    }

    pub fn user_kongpanions(&self, username: Option<&str>, user_id: Option<u64>) -> Response {
        self.transport
            .send(&self.build_user_kongpanions(username, user_id))
    }

    // -----------------------------------------------------------------------
    // Messaging and shared links
    // -----------------------------------------------------------------------

    pub fn build_private_message(&self, api_key: &str, message: &PrivateMessage) -> Result<HttpRequest, ApiError> {
        self.post("api/private_message.json", api_key, message)
    }

    pub fn private_message(&self, api_key: &str, message: &PrivateMessage) -> Result<Response, ApiError> {
        Ok(self
            .transport
            .send(&self.build_private_message(api_key, message)?))
    }

    pub fn build_create_shared_link(&self, api_key: &str, link: &SharedLink) -> Result<HttpRequest, ApiError> {
        self.post("api/shared_links/create.json", api_key, link)
    }

    pub fn create_shared_link(&self, api_key: &str, link: &SharedLink) -> Result<Response, ApiError> {
        Ok(self
            .transport
            .send(&self.build_create_shared_link(api_key, link)?))
    }

    pub fn build_destroy_shared_link(
        &self,
        id: &str,
        api_key: &str,
        user_id: u64,
        game_auth_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let owner = LinkOwner {
            user_id,
            game_auth_token,
        };
        self.post(&format!("api/shared_links/{id}/destroy.json"), api_key, &owner)
    }

    pub fn destroy_shared_link(
        &self,
        id: &str,
        api_key: &str,
        user_id: u64,
        game_auth_token: &str,
    ) -> Result<Response, ApiError> {
        let request = self.build_destroy_shared_link(id, api_key, user_id, game_auth_token)?;
        Ok(self.transport.send(&request))
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// `statistics` maps statistic names to values, e.g. `{"Score": 1000}`.
    /// `api_key` and `user_id` overwrite statistics of the same name.
    pub fn build_submit_statistics(
        &self,
        api_key: &str,
        user_id: u64,
        statistics: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<HttpRequest, ApiError> {
        let mut body = statistics.clone();
        body.insert("api_key".to_string(), api_key.into());
        body.insert("user_id".to_string(), user_id.into());
        let body = serde_json::to_string(&body)?;
        Ok(HttpRequest::post_json(self.url("api/submit_statistics.json"), body))
    }

    pub fn submit_statistics(
        &self,
        api_key: &str,
        user_id: u64,
        statistics: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let request = self.build_submit_statistics(api_key, user_id, statistics)?;
        Ok(self.transport.send(&request))
    }

    // -----------------------------------------------------------------------
    // User information
    // -----------------------------------------------------------------------

    pub fn build_user_info(&self, query: &UserQuery) -> HttpRequest {
        let mut pairs = vec![
            pair("page_num", query.page),
            pair("friends", u8::from(query.friends)),
        ];
        if let Some(username) = query.username.as_deref().filter(|name| !name.is_empty()) {
            pairs.push(pair("username", username));
        }
        if let Some(user_id) = query.user_id {
            pairs.push(pair("user_id", user_id));
        }
        HttpRequest::get(self.url("api/user_info.json")).with_query(pairs)
    }

    /// Information about one user, optionally with their friends list.
    pub fn user_info(&self, query: &UserQuery) -> Response {
        self.transport.send(&self.build_user_info(query))
    }

    pub fn build_users_info(&self, query: &UsersQuery) -> HttpRequest {
        let mut pairs = vec![pair("page_num", query.page)];
        if !query.usernames.is_empty() {
            pairs.push(pair("usernames", join(&query.usernames)));
        }
        if !query.user_ids.is_empty() {
            pairs.push(pair("user_ids", join(&query.user_ids)));
        }
        HttpRequest::get(self.url("api/user_info.json")).with_query(pairs)
    }

    /// Information about several users at once.
    pub fn users_info(&self, query: &UsersQuery) -> Response {
        self.transport.send(&self.build_users_info(query))
    }
}
