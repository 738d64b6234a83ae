use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which uniqueness rule a rejected insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Username,
    Favorite,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Username => f.write_str("Username already exists"),
            Conflict::Favorite => f.write_str("Product is already a favorite"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("not authorized")]
    Unauthorized,

    #[error("{0}")]
    Conflict(Conflict),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Token expiry out of range")]
    ExpiryOutOfRange,

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::Database(_)
                | Error::Migration(_)
                | Error::Hashing(_)
                | Error::Signing(_)
                | Error::ExpiryOutOfRange
                | Error::Task(_)
        )
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated | Error::Unauthorized => StatusCode::UNAUTHORIZED,
            // Duplicate registration keeps the 400 clients already handle.
            Error::Conflict(Conflict::Username) => StatusCode::BAD_REQUEST,
            Error::Conflict(Conflict::Favorite) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = if self.is_internal() {
            tracing::error!(error = %self, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { error })
    }
}
