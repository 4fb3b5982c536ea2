//! # User model and authentication payloads
//!
//! ## [`User`]
//!
//! The account record returned by the login, register and current-user endpoints.
//! The client treats it as opaque: every known field is optional and anything the
//! server adds is kept in [`User::extra`] so it round-trips untouched. Only its
//! presence matters to the session layer.
//!
//! ## Credentials
//!
//! [`LoginData`] and [`RegisterData`] are the request bodies for `/auth/login` and
//! `/auth/register`. Both endpoints answer with an [`AuthResponse`] whose `data`
//! carries the user and a fresh bearer token ([`AuthPayload`]). The current-user
//! check answers with a [`MePayload`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account record as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Fields the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Get display name, falling back to email and then id.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("")
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `data` of a successful login or register response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AuthPayload>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` of `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MePayload {
    pub user: User,
}
