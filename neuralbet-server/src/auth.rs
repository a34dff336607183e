//! Password hashing and session tokens
//!
//! Passwords are hashed with bcrypt before storage. Session tokens are JWTs
//! (HS256) carrying the user id and email, expiring after 7 days.

use crate::users::User;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hash)
}

/// Sign a session token for the given user.
pub fn issue_token(secret: &str, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: (Utc::now() + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a session token and return its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
