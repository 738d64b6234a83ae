use crate::auth::require_identity;
use crate::error::{Error, Result};
use crate::models::{NewFavoriteRequest, UserSummary};
use crate::AppState;
use actix_web::{middleware::from_fn, web, HttpResponse};
use uuid::Uuid;

/// Writes are only allowed on the caller's own favorites.
fn ensure_owner(identity: &UserSummary, user_id: Uuid) -> Result<()> {
    if identity.id != user_id {
        tracing::warn!(
            caller = %identity.id,
            target = %user_id,
            "Rejected write to another user's favorites"
        );
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Any authenticated caller may read any user's favorites.
pub async fn list_favorites(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let favorites = state.favorites().list(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(favorites))
}

pub async fn create_favorite(
    state: web::Data<AppState>,
    identity: web::ReqData<UserSummary>,
    path: web::Path<Uuid>,
    data: web::Json<NewFavoriteRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ensure_owner(&identity, user_id)?;

    let favorite = state.favorites().create(user_id, data.product_id).await?;
    Ok(HttpResponse::Created().json(favorite))
}

pub async fn destroy_favorite(
    state: web::Data<AppState>,
    identity: web::ReqData<UserSummary>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (user_id, favorite_id) = path.into_inner();
    ensure_owner(&identity, user_id)?;

    state.favorites().destroy(user_id, favorite_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users/{user_id}/favorites")
            .wrap(from_fn(require_identity))
            .service(
                web::resource("")
                    .route(web::get().to(list_favorites))
                    .route(web::post().to(create_favorite)),
            )
            .service(web::resource("/{favorite_id}").route(web::delete().to(destroy_favorite))),
    );
}
