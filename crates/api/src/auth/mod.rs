//! Authentication primitives.
//!
//! - [`jwt`] -- Bearer token validation (and issuance for tooling and tests).

pub mod jwt;
