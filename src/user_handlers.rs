use crate::auth::require_identity;
use crate::error::Result;
use crate::models::{CredentialsRequest, LoginResponse, RegisterResponse, UserSummary};
use crate::AppState;
use actix_web::{get, middleware::from_fn, post, web, HttpResponse, Responder};

#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    data: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let (user, token) = state
        .authenticator()
        .register(&data.username, &data.password)
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user: user.into(),
        token,
    }))
}

#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    data: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let token = state
        .authenticator()
        .login(&data.username, &data.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// Echoes the identity the gate resolved for this request.
pub async fn me(identity: web::ReqData<UserSummary>) -> impl Responder {
    HttpResponse::Ok().json(identity.into_inner())
}

#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse> {
    let users = state.users().list_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(
            web::resource("/auth/me")
                .wrap(from_fn(require_identity))
                .route(web::get().to(me)),
        )
        .service(list_users);
}
