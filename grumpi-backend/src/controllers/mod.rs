pub mod catalog;
pub mod health;
pub mod trainers;

use actix_web::HttpResponse;

use crate::store::StoreError;

/// Shared mapping from store errors onto the HTTP error envelope.
/// Callers never see a raw stack trace; the body carries the reason plus a
/// stable category string.
pub fn store_error_response(err: &StoreError) -> HttpResponse {
    let body = serde_json::json!({
        "error": err.to_string(),
        "category": err.category(),
    });

    match err {
        StoreError::NotFound(_) => HttpResponse::NotFound().json(body),
        StoreError::InvalidAmount(_) => HttpResponse::BadRequest().json(body),
        StoreError::Io(_) | StoreError::Parse(_) => {
            log::error!("[STORE] Persist failed: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}
