//! Observability setup for the DetailGreek storefront.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once
//! at startup to choose the level and output format.

mod logging;

pub use logging::*;
