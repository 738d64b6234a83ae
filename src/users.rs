//! Credential store: user rows and their password hashes.

use crate::db::insert_error;
use crate::error::{Conflict, Error, Result};
use crate::models::{User, UserSummary};
use crate::password::PasswordHasher;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const MAX_USERNAME_LEN: usize = 20;

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
    hasher: &'a PasswordHasher,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool, hasher: &'a PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    /// Inserts a new user with a freshly hashed password.
    ///
    /// There is no lookup beforehand: the `UNIQUE` constraint on `username`
    /// decides, so concurrent registrations of one name yield exactly one row
    /// and `Error::Conflict` for the rest.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        validate_credentials(username, password)?;
        let password_hash = self.hasher.hash(password).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| insert_error(e, Conflict::Username))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Exact, case-sensitive match.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<UserSummary>> {
        let users =
            sqlx::query_as::<_, UserSummary>("SELECT id, username FROM users ORDER BY rowid")
                .fetch_all(self.pool)
                .await?;
        Ok(users)
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::Validation("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(Error::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if password.is_empty() {
        return Err(Error::Validation("password is required".to_string()));
    }
    Ok(())
}
