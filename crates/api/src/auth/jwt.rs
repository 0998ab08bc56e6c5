//! Access tokens and opaque tokens.
//!
//! Access tokens are short-lived HS256 JWTs carrying [`Claims`]. Refresh and
//! password-reset tokens are random strings handed to the client once; the
//! database only ever sees their SHA-256 digest.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pulse_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::env_or;

/// `iss` claim stamped on and required of every access token.
pub const TOKEN_ISSUER: &str = "pulse-api";

/// Access token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Display name, used as the comment author without a lookup.
    pub name: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for signing and verifying.
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `7`     |
    ///
    /// # Panics
    ///
    /// If `JWT_SECRET` is unset or blank.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.trim().is_empty(), "JWT_SECRET must be set");

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation
    }
}

/// Sign an access token for a user.
pub fn generate_access_token(
    user_id: DbId,
    name: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        name: name.to_owned(),
        iss: TOKEN_ISSUER.to_owned(),
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
        jti: Uuid::now_v7().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer and expiry, returning the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}

/// A fresh opaque token as `(plaintext, sha256_hex)`.
///
/// Two v4 UUIDs in simple form give 244 random bits.
pub fn generate_opaque_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let digest = hash_token(&plaintext);
    (plaintext, digest)
}

/// Hex SHA-256 of an opaque token, as stored in the database.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
