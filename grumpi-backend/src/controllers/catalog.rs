use actix_web::{web, HttpResponse};

use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/combat-items").route(web::get().to(list_combat_items)));
}

/// GET /api/combat-items — the read-only item catalog
async fn list_combat_items(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.list())
}
