use acme_auth_store::{
    auth::TokenService, config::Config, configure, db, password::PasswordHasher, seed, AppState,
};
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; signing tokens with the development fallback secret. Do not run like this in production.");
    }

    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("failed to open database")?;
    db::migrate(&pool).await.context("failed to migrate database")?;

    let state = AppState::new(
        pool,
        PasswordHasher::new(config.bcrypt_cost)?,
        TokenService::new(config.signing_secret(), config.token_ttl()),
    );

    if config.seed {
        seed::seed(&state).await.context("failed to seed database")?;
    }

    let addr = config.bind_addr();
    tracing::info!(%addr, "Listening");

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
