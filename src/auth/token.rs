//! Stateless signed identity tokens (HS256 JWT).

use crate::error::{Error, Result};
use crate::models::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenService {
    /// `ttl` of `None` issues tokens that never expire.
    pub fn new(secret: &str, ttl: Option<Duration>) -> Self {
        let mut validation = Validation::default();
        if ttl.is_none() {
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
        }

        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, subject_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let exp = match self.ttl {
            Some(ttl) => Some(
                now.checked_add_signed(ttl)
                    .ok_or(Error::ExpiryOutOfRange)?
                    .timestamp(),
            ),
            None => None,
        };
        let claims = Claims {
            sub: subject_id,
            iat: now.timestamp(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(Error::Signing)
    }

    /// Any decode failure (bad signature, malformed, expired) is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                Error::Unauthorized
            })
    }
}
