//! Request extractors and response middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`errors`] -- Error envelope details in development, panic rendering.

pub mod auth;
pub mod errors;
