//! JWT bearer-token issuance and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Every
//! validation checks the signature, expiry, issuer, and audience.

use cinereview_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of an issued token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Default `iss` claim.
const DEFAULT_ISSUER: &str = "cinereview";
/// Default `aud` claim.
const DEFAULT_AUDIENCE: &str = "cinereview-clients";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's database id, rendered as a string.
    pub sub: String,
    /// The user's username at issuance time.
    pub name: String,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Option<DbId> {
        self.sub.parse().ok()
    }
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret. Issuance fails while this is unset.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default              |
    /// |----------------|----------|----------------------|
    /// | `JWT_KEY`      | no       | --                   |
    /// | `JWT_ISSUER`   | no       | `cinereview`         |
    /// | `JWT_AUDIENCE` | no       | `cinereview-clients` |
    ///
    /// A missing key is not fatal at startup: the server runs, and
    /// registration/login report a configuration error when they try to
    /// issue a token.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_KEY").ok().filter(|s| !s.is_empty());
        if secret.is_none() {
            tracing::warn!("JWT_KEY is not set; token issuance will fail");
        }

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self {
            secret,
            issuer,
            audience,
        }
    }

    fn secret(&self) -> Result<&[u8], TokenError> {
        self.secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(TokenError::MissingSigningKey)
    }
}

/// Errors from token issuance or validation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT signing key is not configured")]
    MissingSigningKey,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Issue an HS256 token for the given user, valid for [`TOKEN_LIFETIME_HOURS`].
pub fn issue_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let secret = config.secret()?;
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        name: username.to_string(),
        jti: Uuid::new_v4().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now + TOKEN_LIFETIME_HOURS * 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;
    Ok(token)
}

/// Validate and decode a token, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let secret = config.secret()?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}
