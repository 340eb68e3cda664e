//! Application services.
//!
//! Services sit between handlers and the repository/gateway traits. They
//! return read models or `Option`/`bool` for absence and never build HTTP
//! responses; handlers decide the status code.

pub mod auth;
pub mod movies;
pub mod reviews;

pub use auth::AuthService;
pub use movies::MovieService;
pub use reviews::ReviewService;
