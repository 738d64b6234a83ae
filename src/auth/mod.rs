//! Login, registration and the per-request identity gate.

pub mod gate;
pub mod token;

pub use gate::{require_identity, resolve_identity};
pub use token::TokenService;

use crate::error::{Error, Result};
use crate::models::User;
use crate::password::PasswordHasher;
use crate::users::UserRepository;
use sqlx::SqlitePool;

pub struct Authenticator<'a> {
    pool: &'a SqlitePool,
    hasher: &'a PasswordHasher,
    tokens: &'a TokenService,
}

impl<'a> Authenticator<'a> {
    pub fn new(pool: &'a SqlitePool, hasher: &'a PasswordHasher, tokens: &'a TokenService) -> Self {
        Self {
            pool,
            hasher,
            tokens,
        }
    }

    fn users(&self) -> UserRepository<'a> {
        UserRepository::new(self.pool, self.hasher)
    }

    /// Unknown username and wrong password both end in `Unauthorized`, and
    /// both pay for exactly one bcrypt verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "username and password are required".to_string(),
            ));
        }

        let verified = match self.users().find_by_username(username).await? {
            Some(user) => {
                let matched = self.hasher.verify(password, &user.password_hash).await;
                matched.then_some(user)
            }
            None => {
                self.hasher.verify_dummy(password).await;
                None
            }
        };

        let Some(user) = verified else {
            tracing::warn!("Login rejected");
            return Err(Error::Unauthorized);
        };

        tracing::info!(user_id = %user.id, "User logged in");
        self.tokens.issue(user.id)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(User, String)> {
        let user = self.users().create_user(username, password).await?;
        let token = self.tokens.issue(user.id)?;
        Ok((user, token))
    }
}
