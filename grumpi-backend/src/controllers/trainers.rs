//! Trainer controller - REST surface over the trainer store.

use actix_web::{web, HttpResponse};

use crate::controllers::store_error_response;
use crate::models::{
    AssignItemRequest, CreateTrainerRequest, DepositRequest, ItemKind, UpdateTrainerRequest,
};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    // The fixed grumpidolar routes must come before the `{kind}` catch-all.
    cfg.service(
        web::scope("/api/trainers")
            .route("", web::get().to(list_trainers))
            .route("", web::post().to(create_trainer))
            .route("/{name}", web::get().to(get_trainer))
            .route("/{name}", web::put().to(update_trainer))
            .route("/{name}", web::delete().to(delete_trainer))
            .route("/{name}/grumpidolars", web::post().to(deposit))
            .route(
                "/{name}/grumpidolars/purchase",
                web::post().to(deposit_after_purchase),
            )
            .route("/{name}/{kind}", web::post().to(assign_item)),
    );
}

/// GET /api/trainers — full table
async fn list_trainers(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.list())
}

/// POST /api/trainers — create a trainer
async fn create_trainer(
    state: web::Data<AppState>,
    body: web::Json<CreateTrainerRequest>,
) -> HttpResponse {
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Trainer name must not be empty"
        }));
    }

    match state.store.create(body.into_inner()) {
        Ok(trainer) => HttpResponse::Created().json(trainer),
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/trainers/{name} — single trainer projection
///
/// Absence is reported in the body, not as an HTTP error.
async fn get_trainer(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    match state.store.get(&name) {
        Some(trainer) => HttpResponse::Ok().json(serde_json::json!({
            "found": true,
            "trainer": trainer,
        })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "found": false,
            "trainer": null,
        })),
    }
}

/// PUT /api/trainers/{name} — overwrite profile fields present in the body
async fn update_trainer(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateTrainerRequest>,
) -> HttpResponse {
    let name = path.into_inner();
    match state.store.update_profile(&name, body.into_inner()) {
        Ok(trainer) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Trainer '{}' updated", name),
            "trainer": trainer,
        })),
        Err(e) => store_error_response(&e),
    }
}

/// DELETE /api/trainers/{name} — remove and return the updated table
async fn delete_trainer(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    match state.store.delete(&name) {
        Ok(trainers) => HttpResponse::Ok().json(trainers),
        Err(e) => store_error_response(&e),
    }
}

/// POST /api/trainers/{name}/{kind} — append to creatures, energies or medals
async fn assign_item(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<AssignItemRequest>,
) -> HttpResponse {
    let (name, kind_raw) = path.into_inner();
    let kind = match ItemKind::from_route(&kind_raw) {
        Some(kind) => kind,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Unknown item kind '{}'", kind_raw)
            }));
        }
    };

    match state.store.assign_item(&name, kind, &body.value) {
        Ok(trainer) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Assigned {} '{}' to trainer '{}'", kind, body.value, name),
            "trainer": trainer,
        })),
        Err(e) => store_error_response(&e),
    }
}

/// POST /api/trainers/{name}/grumpidolars — deposit grumpidolars
async fn deposit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<DepositRequest>,
) -> HttpResponse {
    let name = path.into_inner();
    match state.store.deposit(&name, &body.amount) {
        Ok(balance) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Deposit applied for trainer '{}'", name),
            "currency": balance,
        })),
        Err(e) => store_error_response(&e),
    }
}

/// POST /api/trainers/{name}/grumpidolars/purchase — post-purchase deposit
/// (validated and logged, balance unchanged; see the store docs)
async fn deposit_after_purchase(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<DepositRequest>,
) -> HttpResponse {
    let name = path.into_inner();
    match state.store.deposit_after_purchase(&name, &body.amount) {
        Ok(balance) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Post-purchase deposit recorded for trainer '{}'", name),
            "currency": balance,
        })),
        Err(e) => store_error_response(&e),
    }
}
