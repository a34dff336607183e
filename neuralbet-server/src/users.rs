//! User store
//!
//! The store is behind a trait so handlers can be exercised against an
//! in-memory double. Production uses Postgres through sqlx; the schema is
//! ensured at startup. Emails are unique.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)
"#;

/// A stored account. The password hash never leaves this module's callers
/// except for verification.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields for a new account (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// The email is already registered
    #[error("email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new account. A unique-violation on email maps to
    /// [`StoreError::DuplicateEmail`], which covers the lookup/insert race.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Postgres-backed store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Connect and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, password_hash",
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            _ => StoreError::Backend(e),
        })?;

        Ok(inserted)
    }
}

/// In-memory store for handler tests
#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<HashMap<String, User>>,
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.email) {
                return Err(StoreError::DuplicateEmail);
            }
            let stored = User {
                id: Uuid::new_v4(),
                name: user.name,
                email: user.email.clone(),
                password_hash: user.password_hash,
            };
            users.insert(user.email, stored.clone());
            Ok(stored)
        }
    }
}
