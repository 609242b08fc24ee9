//! User types.

use detail_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// A customer account as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "userId")]
    pub id: UserId,
    pub email: String,
    #[serde(default, alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(default, alias = "last_name")]
    pub last_name: Option<String>,
}

impl Profile {
    /// "First Last" when a name is known, the email otherwise.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

/// The customer at the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum User {
    /// Guest; may still browse and fill a cart.
    #[default]
    Anonymous,
    /// Signed in.
    Authenticated(Profile),
}

impl User {
    /// Check if user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, User::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            User::Authenticated(profile) => Some(profile),
            User::Anonymous => None,
        }
    }

    /// Get user ID if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        self.profile().map(|p| &p.id)
    }

    /// Get email if authenticated.
    pub fn email(&self) -> Option<&str> {
        self.profile().map(|p| p.email.as_str())
    }

    pub fn display_name(&self) -> String {
        match self {
            User::Authenticated(profile) => profile.display_name(),
            User::Anonymous => "Guest".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_json() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "ravi@example.com",
            "firstName": "Ravi",
            "lastName": "Kumar"
        }))
        .unwrap();
        assert_eq!(profile.id, UserId::from(7u64));
        assert_eq!(profile.display_name(), "Ravi Kumar");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile = Profile {
            id: UserId::new("u1"),
            email: "a@b.co".into(),
            first_name: Some("  ".into()),
            last_name: None,
        };
        assert_eq!(profile.display_name(), "a@b.co");
    }

    #[test]
    fn test_anonymous_user() {
        let user = User::default();
        assert!(!user.is_authenticated());
        assert!(user.user_id().is_none());
        assert_eq!(user.display_name(), "Guest");
    }
}
