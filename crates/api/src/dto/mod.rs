//! Request and response bodies for the HTTP API.
//!
//! All JSON field names are camelCase. Request types carry their validation
//! rules via `validator` and are consumed through
//! [`crate::extract::ValidatedJson`].

pub mod auth;
pub mod movie;
pub mod review;
