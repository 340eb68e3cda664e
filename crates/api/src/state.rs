use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{AuthService, MovieService, ReviewService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT validation, error detail mode).
    pub config: Arc<ServerConfig>,
    pub auth: Arc<AuthService>,
    pub movies: Arc<MovieService>,
    pub reviews: Arc<ReviewService>,
}
