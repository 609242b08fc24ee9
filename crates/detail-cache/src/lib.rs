//! Type-safe key-value storage for the DetailGreek storefront.
//!
//! Plays the part browser local storage plays for a web client: a small set
//! of well-known keys (auth token, signed-in user, remembered email, cart)
//! that survive between runs, each stored as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use detail_cache::Cache;
//!
//! let cache = Cache::open("~/.detailgreek")?;
//!
//! cache.set("detailGreekCart", &cart)?;
//! let cart: Option<StoredCart> = cache.get("detailGreekCart")?;
//! cache.delete("detailGreekCart")?;
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::Cache;
pub use session::{
    SessionStore, StoredSession, REMEMBER_EMAIL_KEY, TOKEN_KEY, USER_KEY,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, SessionStore, StoredSession};
}
