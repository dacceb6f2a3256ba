//! Track registry API routes

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::info;

use super::{confirmation_required, not_found, AppState, ConfirmQuery, SearchQuery};
use crate::models::{TrackDraft, TrackPatch};

/// GET /tracks
#[get("")]
pub async fn list_tracks(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let tracks = state.store.read(|data| data.search_tracks(&query.q));
    HttpResponse::Ok().json(tracks)
}

/// POST /tracks
#[post("")]
pub async fn create_track(
    state: web::Data<AppState>,
    body: web::Json<TrackDraft>,
) -> impl Responder {
    let draft = body.into_inner();
    let track = state.store.mutate(|data| data.create_track(draft)).await;

    info!(id = %track.id, title = %track.title, "Created track");
    HttpResponse::Created().json(track)
}

/// PUT /tracks/{id}
#[put("/{id}")]
pub async fn update_track(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TrackPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    match state.store.mutate(|data| data.update_track(&id, patch)).await {
        Some(track) => HttpResponse::Ok().json(track),
        None => not_found("Track", &id),
    }
}

/// DELETE /tracks/{id}?confirm=true
#[delete("/{id}")]
pub async fn delete_track(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> impl Responder {
    let id = path.into_inner();
    if !query.confirm {
        return confirmation_required();
    }

    match state.store.mutate(|data| data.delete_track(&id)).await {
        Some(track) => HttpResponse::Ok().json(track),
        None => not_found("Track", &id),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tracks)
        .service(create_track)
        .service(update_track)
        .service(delete_track);
}
