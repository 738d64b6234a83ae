use crate::error::{Error, Result};
use crate::models::UserSummary;
use crate::AppState;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderValue, AUTHORIZATION},
    middleware::Next,
    web, HttpMessage, ResponseError,
};

/// Resolves the `Authorization` header to an existing user. Read-only.
pub async fn resolve_identity(
    state: &AppState,
    header: Option<&HeaderValue>,
) -> Result<UserSummary> {
    let raw = header.ok_or(Error::Unauthenticated)?;
    let raw = raw.to_str().map_err(|_| Error::Unauthorized)?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(Error::Unauthenticated);
    }

    let subject_id = state.tokens.verify(token)?;

    match state.users().find_by_id(subject_id).await? {
        Some(user) => Ok(user.into()),
        None => {
            tracing::warn!(user_id = %subject_id, "Token subject does not exist");
            Err(Error::Unauthorized)
        }
    }
}

/// Middleware that rejects the request unless it carries a valid token.
/// Downstream handlers read the identity with `web::ReqData<UserSummary>`.
pub async fn require_identity(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("missing application state"))?;

    match resolve_identity(&state, req.headers().get(AUTHORIZATION)).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        }
        Err(e) => Ok(req
            .into_response(e.error_response())
            .map_into_right_body()),
    }
}
