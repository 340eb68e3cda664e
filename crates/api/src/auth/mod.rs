//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and the
//!   registration password policy.
//! - [`jwt`] -- JWT bearer-token issuance and validation.

pub mod jwt;
pub mod password;
