//! Sign-in and sign-up form validation.
//!
//! Messages are the ones the storefront shows next to each field.

use crate::password::PasswordStrength;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Per-field error messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<Field, &'static str>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn check(&mut self, field: Field, error: Option<&'static str>) {
        if let Some(message) = error {
            self.0.insert(field, message);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<_> = self.0.values().copied().collect();
        f.write_str(&messages.join("; "))
    }
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Email is required")
    } else if !EMAIL_RE.is_match(email) {
        Some("Please enter a valid email")
    } else {
        None
    }
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(message)
}

/// Sign-in form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Keep the email for the next sign-in.
    #[serde(skip)]
    pub remember: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember: false,
        }
    }

    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        errors.into_result()
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(
            Field::FirstName,
            required(&self.first_name, "First name is required"),
        );
        errors.check(
            Field::LastName,
            required(&self.last_name, "Last name is required"),
        );
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        if self.confirm_password != self.password {
            errors.check(Field::ConfirmPassword, Some("Passwords do not match"));
        }
        errors.into_result()
    }

    pub fn password_strength(&self) -> PasswordStrength {
        PasswordStrength::of(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), Some("Email is required"));
        assert_eq!(validate_email("a@b"), Some("Please enter a valid email"));
        assert_eq!(validate_email("a b@c.io"), Some("Please enter a valid email"));
        assert_eq!(validate_email("shine@detailgreek.in"), None);
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Some("Password is required"));
        assert_eq!(
            validate_password("12345"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(validate_password("123456"), None);
    }

    #[test]
    fn test_login_form() {
        assert!(LoginForm::new("a@b.co", "secret1").validate().is_ok());

        let errors = LoginForm::new("", "").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn test_signup_form() {
        let mut form = SignupForm {
            first_name: String::new(),
            last_name: "Kumar".into(),
            email: "ravi@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::FirstName), Some("First name is required"));
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.get(Field::LastName), None);

        form.first_name = "Ravi".into();
        form.confirm_password = "secret1".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_signup_body_omits_confirmation() {
        let form = SignupForm {
            first_name: "Ravi".into(),
            last_name: "Kumar".into(),
            email: "ravi@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["firstName"], "Ravi");
        assert!(body.get("confirmPassword").is_none());
    }
}
