//! Registration and login.
//!
//! Soft failures (taken username, weak password, bad credentials) come back
//! as an [`AuthResult`] with `success: false`. Only infrastructure problems
//! (database, hashing, missing signing key) are `Err`.

use std::sync::Arc;

use cinereview_core::error::CoreError;
use cinereview_db::models::user::{CreateUser, User};
use cinereview_db::repositories::UserRepository;

use crate::auth::jwt::{issue_token, JwtConfig, TokenError};
use crate::auth::password::{hash_password, password_policy_violations, verify_password};
use crate::dto::auth::{AuthResult, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};

pub const USERNAME_TAKEN: &str = "Username already exists";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful";
/// Same text for unknown usernames and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const LOGIN_SUCCEEDED: &str = "Login successful";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Create an account and issue a token for it.
    pub async fn register(&self, input: &RegisterRequest) -> AppResult<AuthResult> {
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Ok(AuthResult::failed(USERNAME_TAKEN));
        }

        let violations = password_policy_violations(&input.password);
        if !violations.is_empty() {
            return Ok(AuthResult::failed(violations.join(", ")));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        let created = self
            .users
            .create(&CreateUser {
                username: input.username.clone(),
                email: input.email.clone(),
                password_hash,
            })
            .await?;

        // Lost a race with a concurrent registration of the same name.
        let Some(user) = created else {
            return Ok(AuthResult::failed(USERNAME_TAKEN));
        };

        let token = self.issue(&user)?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(AuthResult::succeeded(token, REGISTRATION_SUCCEEDED))
    }

    /// Check credentials and issue a token.
    pub async fn login(&self, input: &LoginRequest) -> AppResult<AuthResult> {
        let Some(user) = self.users.find_by_username(&input.username).await? else {
            return Ok(AuthResult::failed(INVALID_CREDENTIALS));
        };

        let password_valid = verify_password(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !password_valid {
            return Ok(AuthResult::failed(INVALID_CREDENTIALS));
        }

        let token = self.issue(&user)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthResult::succeeded(token, LOGIN_SUCCEEDED))
    }

    fn issue(&self, user: &User) -> AppResult<String> {
        issue_token(user.id, &user.username, &self.jwt).map_err(|e| match e {
            TokenError::MissingSigningKey => AppError::Core(CoreError::Configuration(e.to_string())),
            TokenError::Jwt(err) => AppError::InternalError(format!("Token signing error: {err}")),
        })
    }
}
