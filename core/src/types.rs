//! Parameter types for endpoints that take more than a handful of fields.
//!
//! # Design
//! Write payloads serialize straight into the request body, so field names
//! and declaration order follow the remote API. Optional fields are skipped
//! when unset. An explicitly empty string counts as unset because the
//! remote service has never distinguished the two.

use serde::{Deserialize, Serialize};

fn default_server() -> String {
    "Default".to_string()
}

fn default_page() -> u32 {
    1
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Unset, empty or the string "0". Character fields are dropped on this
/// looser rule.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.is_empty() || v == "0")
}

fn is_unset_id(value: &Option<u64>) -> bool {
    value.map_or(true, |id| id == 0)
}

/// A guild definition for `create_guild`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guild {
    #[serde(default = "default_server")]
    pub server_identifier: String,
    #[serde(default = "default_server")]
    pub server_name: String,
    pub guild_identifier: String,
    pub guild_name: String,
}

impl Guild {
    /// A guild on the "Default" server.
    pub fn new(guild_identifier: &str, guild_name: &str) -> Self {
        Self {
            server_identifier: default_server(),
            server_name: default_server(),
            guild_identifier: guild_identifier.to_string(),
            guild_name: guild_name.to_string(),
        }
    }

    pub fn on_server(mut self, server_identifier: &str, server_name: &str) -> Self {
        self.server_identifier = server_identifier.to_string();
        self.server_name = server_name.to_string();
        self
    }
}

/// A game character, optionally placed in a guild.
///
/// `user_id` of zero is treated as absent, and so is a guild field or
/// admin level that is empty or exactly `"0"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub character_identifier: String,
    pub character_name: String,
    #[serde(default = "default_server")]
    pub server_identifier: String,
    #[serde(default = "default_server")]
    pub server_name: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub guild_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub guild_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset_id")]
    pub user_id: Option<u64>,
    /// `superadmin` or `admin` grant guild privileges.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub guild_admin_level: Option<String>,
}

impl Character {
    pub fn new(character_identifier: &str, character_name: &str) -> Self {
        Self {
            character_identifier: character_identifier.to_string(),
            character_name: character_name.to_string(),
            server_identifier: default_server(),
            server_name: default_server(),
            guild_identifier: None,
            guild_name: None,
            user_id: None,
            guild_admin_level: None,
        }
    }

    pub fn on_server(mut self, server_identifier: &str, server_name: &str) -> Self {
        self.server_identifier = server_identifier.to_string();
        self.server_name = server_name.to_string();
        self
    }

    pub fn in_guild(mut self, guild_identifier: &str, guild_name: &str) -> Self {
        self.guild_identifier = Some(guild_identifier.to_string());
        self.guild_name = Some(guild_name.to_string());
        self
    }
}

/// A private message. One of `user_id` or `username` must be set; this is
/// not checked locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateMessage {
    /// HTML is stripped by the server; bold and italics are rendered.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub image_url: Option<String>,
}

impl PrivateMessage {
    pub fn to_user_id(user_id: u64, content: &str) -> Self {
        Self {
            content: content.to_string(),
            user_id: Some(user_id),
            username: None,
            image_url: None,
        }
    }

    pub fn to_username(username: &str, content: &str) -> Self {
        Self {
            content: content.to_string(),
            user_id: None,
            username: Some(username.to_string()),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: &str) -> Self {
        self.image_url = Some(image_url.to_string());
        self
    }
}

/// A shared link shown to a user's friends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedLink {
    pub user_id: u64,
    pub game_auth_token: String,
    /// Identifier of the event in the game's own system.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub link_type: String,
    /// URL-encoded parameters for the game frame; only `kv_` keys pass through.
    pub link_params: String,
    /// UNIX timestamp after which the link is hidden.
    pub expiration: i64,
    /// JSON-encoded object with extra information about the link.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub kv_params: Option<String>,
}

/// Lookup of a single user. One of `username` or `user_id` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default = "default_page")]
    pub page: u32,
    /// Include the friends list.
    #[serde(default)]
    pub friends: bool,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            username: None,
            user_id: None,
            page: default_page(),
            friends: false,
        }
    }
}

impl UserQuery {
    pub fn by_username(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            ..Self::default()
        }
    }

    pub fn by_user_id(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}

/// Batch lookup of up to 50 users by name and/or id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersQuery {
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default)]
    pub user_ids: Vec<u64>,
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            usernames: Vec::new(),
            user_ids: Vec::new(),
            page: default_page(),
        }
    }
}
