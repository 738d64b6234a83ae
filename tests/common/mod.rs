#![allow(dead_code)]

use acme_auth_store::{auth::TokenService, db, password::PasswordHasher, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub const TEST_SECRET: &str = "test_secret_key_minimum_32_characters_long";

/// In-memory database on a single long-lived connection, migrated.
pub async fn test_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    db::migrate(&pool).await.expect("Failed to run migrations");

    state_with_pool(pool)
}

/// File-backed database with a multi-connection pool, so writes from
/// different tasks really run side by side.
pub async fn file_state(dir: &temp_dir::TempDir) -> AppState {
    let url = format!("sqlite:{}", dir.child("auth.db").display());
    let pool = db::create_pool(&url, 5)
        .await
        .expect("Failed to create test database");

    db::migrate(&pool).await.expect("Failed to run migrations");

    state_with_pool(pool)
}

fn state_with_pool(pool: SqlitePool) -> AppState {
    AppState::new(
        pool,
        PasswordHasher::new(4 /* bcrypt minimum cost */).expect("hasher"),
        TokenService::new(TEST_SECRET, Some(chrono::Duration::hours(24))),
    )
}
