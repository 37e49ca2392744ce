//! Request and response payloads exchanged with the directory's auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::types::{AccessToken, RefreshToken, UserId};

/// Wire envelope wrapping most directory responses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub result: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Tokens and profile returned by a successful login.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

pub type RegisterResponse = Envelope<CurrentUser>;

/// Body of the refresh call: `{"token": "..."}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub token: RefreshToken,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Body of the logout call.
///
/// Serializes to `{"token": "..."}` when a refresh token is known and to `{}`
/// otherwise.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub type ReactivateResponse = Envelope<serde_json::Value>;

/// Profile of the signed-in console operator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
