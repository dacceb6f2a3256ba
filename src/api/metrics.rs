//! Metrics and record count routes

use actix_web::{get, web, HttpResponse, Responder};

use super::AppState;

/// GET /metrics
#[get("")]
pub async fn list_metrics(state: web::Data<AppState>) -> impl Responder {
    let metrics = state.store.read(|data| data.metrics.clone());
    HttpResponse::Ok().json(metrics)
}

/// GET /stats
#[get("")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.read(|data| data.stats()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_metrics);
}

pub fn configure_stats(cfg: &mut web::ServiceConfig) {
    cfg.service(get_stats);
}
