//! Authentication module for the DetailGreek storefront.
//!
//! Validates the sign-in and sign-up forms, talks to the `/auth` endpoints
//! and keeps the resulting session in a [`detail_cache::Cache`].

mod error;
pub mod forms;
mod password;
mod session;
mod token;
mod user;

pub use error::AuthError;
pub use forms::{Field, FormErrors, LoginForm, SignupForm};
pub use password::PasswordStrength;
pub use session::AuthSession;
pub use token::AuthResponse;
pub use user::{Profile, User};
