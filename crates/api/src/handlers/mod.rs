//! HTTP handlers.
//!
//! Cross-origin preflights (any `OPTIONS` request) are answered with an empty
//! 200 by the CORS layer in [`crate::router`] and never reach a handler.

pub mod access;
pub mod completion;
