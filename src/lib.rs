pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod favorite_handlers;
pub mod favorites;
pub mod models;
pub mod password;
pub mod product_handlers;
pub mod products;
pub mod seed;
pub mod user_handlers;
pub mod users;

use actix_web::{get, web, HttpResponse, Responder};
use auth::{Authenticator, TokenService};
use favorites::FavoriteRepository;
use password::PasswordHasher;
use products::ProductRepository;
use sqlx::SqlitePool;
use users::UserRepository;

/// Shared, cheaply cloned handles every worker gets a copy of.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub hasher: PasswordHasher,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: SqlitePool, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            pool,
            hasher,
            tokens,
        }
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool, &self.hasher)
    }

    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.pool)
    }

    pub fn favorites(&self) -> FavoriteRepository<'_> {
        FavoriteRepository::new(&self.pool)
    }

    pub fn authenticator(&self) -> Authenticator<'_> {
        Authenticator::new(&self.pool, &self.hasher, &self.tokens)
    }
}

/// Simple health check
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Route table and extractor configuration, shared by `main` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        error::Error::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        error::Error::Validation(err.to_string()).into()
    }))
    .service(health)
    .service(
        web::scope("/api")
            .configure(user_handlers::configure)
            .configure(product_handlers::configure)
            .configure(favorite_handlers::configure),
    );
}
