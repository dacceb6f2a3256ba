//! REST API routes for prdesk

pub mod ai;
pub mod backup;
pub mod contacts;
pub mod links;
pub mod metrics;
pub mod plans;
pub mod tracks;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use crate::plugins::TextGenerator;
use crate::stores::DashboardStore;

/// Shared state handed to every handler
pub struct AppState {
    pub store: DashboardStore,
    pub ai: Arc<dyn TextGenerator>,
    pub backups_dir: PathBuf,
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Contact routes (all three partitions)
        .service(web::scope("/contacts").configure(contacts::configure))
        // Track registry routes
        .service(web::scope("/tracks").configure(tracks::configure))
        // Release plan and checklist routes
        .service(web::scope("/plans").configure(plans::configure))
        // Quick link routes
        .service(web::scope("/links").configure(links::configure))
        // Metrics routes
        .service(web::scope("/metrics").configure(metrics::configure))
        // Record counts
        .service(web::scope("/stats").configure(metrics::configure_stats))
        // AI pitch and smart import routes
        .service(web::scope("/ai").configure(ai::configure))
        // Export, import and file backup routes
        .service(web::scope("/backup").configure(backup::configure));
}

/// `?q=` search box text
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `?confirm=true` must accompany every delete
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub(crate) fn not_found(what: &str, id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": format!("{} '{}' not found", what, id)
    }))
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message.into() }))
}

pub(crate) fn confirmation_required() -> HttpResponse {
    HttpResponse::Conflict().json(json!({
        "error": "Deletion must be confirmed with ?confirm=true"
    }))
}

#[cfg(test)]
pub(crate) mod testing {
    use actix_web::web;
    use std::path::Path;
    use std::sync::Arc;

    use super::AppState;
    use crate::plugins::testing::CannedGenerator;
    use crate::stores::{sample_data, DashboardStore};

    /// Handler state over the sample records, with a canned AI reply
    pub fn state(backups_dir: &Path, ai: CannedGenerator) -> web::Data<AppState> {
        web::Data::new(AppState {
            store: DashboardStore::in_memory(sample_data()),
            ai: Arc::new(ai),
            backups_dir: backups_dir.to_path_buf(),
        })
    }

    pub fn sample_state() -> web::Data<AppState> {
        state(Path::new("backups-unused"), CannedGenerator::failing())
    }
}
