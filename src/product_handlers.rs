use crate::error::Result;
use crate::AppState;
use actix_web::{get, web, HttpResponse};

#[get("/products")]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse> {
    let products = state.products().list().await?;
    Ok(HttpResponse::Ok().json(products))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products);
}
