//! Auth endpoint payloads.

use crate::user::Profile;
use serde::Deserialize;

/// Body of `/auth/login`, `/auth/register` and `/auth/refresh` responses.
///
/// Every field is optional: registration may answer with just a message,
/// refresh with just a token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Profile>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Token and user, when the response signs the customer in.
    pub fn into_login(self) -> Option<(String, Profile)> {
        match (self.token, self.user) {
            (Some(token), Some(user)) if !token.is_empty() => Some((token, user)),
            _ => None,
        }
    }
}
