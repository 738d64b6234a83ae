//! Salted one-way password hashing backed by bcrypt.

use crate::error::Result;
use bcrypt::{hash, verify};
use tokio::task;

const DUMMY_PASSWORD: &str = "not-a-real-password";

/// bcrypt wrapper whose CPU-heavy work runs on the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Builds a hasher at `cost`, precomputing a hash that `verify_dummy`
    /// burns time against when there is no stored hash to check.
    pub fn new(cost: u32) -> Result<Self> {
        let dummy_hash = hash(DUMMY_PASSWORD, cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || hash(plaintext, cost)).await??;
        Ok(hashed)
    }

    /// Returns false for a wrong password and for anything that is not a
    /// valid bcrypt hash.
    pub async fn verify(&self, plaintext: &str, hash_string: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let hash_string = hash_string.to_owned();
        match task::spawn_blocking(move || verify(plaintext, &hash_string).unwrap_or(false)).await {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(error = %e, "Password verification task failed");
                false
            }
        }
    }

    /// Spends one verification's worth of CPU and always fails.
    pub async fn verify_dummy(&self, plaintext: &str) -> bool {
        let dummy_hash = self.dummy_hash.clone();
        self.verify(plaintext, &dummy_hash).await;
        false
    }
}
