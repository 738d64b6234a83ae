use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is unset. Development only.
pub const DEV_FALLBACK_SECRET: &str = "secret";

/// Upper bound for `TOKEN_TTL_HOURS`: ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// `None` means the fallback secret is in use.
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours; 0 issues tokens without an expiry.
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub seed: bool,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to
    /// pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:acme_auth_store.db".to_string()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            token_ttl_hours: parse_ranged_var("TOKEN_TTL_HOURS", 24, 0..=MAX_TOKEN_TTL_HOURS)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            seed: parse_var("SEED", false)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn signing_secret(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(DEV_FALLBACK_SECRET)
    }

    /// `None` when tokens should never expire.
    pub fn token_ttl(&self) -> Option<chrono::Duration> {
        (self.token_ttl_hours > 0).then(|| chrono::Duration::hours(self.token_ttl_hours))
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

fn parse_ranged_var<T>(
    key: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd,
{
    let value = parse_var(key, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: env::var(key).unwrap_or_default(),
        })
    }
}
