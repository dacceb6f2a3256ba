//! AI pitch and smart import routes

use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{bad_request, not_found, AppState};
use crate::plugins::{pitch, smart_import};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchBody {
    pub contact_id: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct PitchResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub message: String,
}

/// POST /ai/pitch
#[post("/pitch")]
pub async fn generate_pitch(
    state: web::Data<AppState>,
    body: web::Json<PitchBody>,
) -> impl Responder {
    let Some(contact) = state
        .store
        .read(|data| data.find_contact(&body.contact_id).cloned())
    else {
        return not_found("Contact", &body.contact_id);
    };

    let text = pitch::generate_pitch(state.ai.as_ref(), &contact, &body.context).await;
    HttpResponse::Ok().json(PitchResponse { text })
}

/// POST /ai/import
#[post("/import")]
pub async fn import_records(
    state: web::Data<AppState>,
    body: web::Json<ImportBody>,
) -> impl Responder {
    if body.text.trim().is_empty() {
        return bad_request("Nothing to import");
    }

    let payload = smart_import::extract(state.ai.as_ref(), &body.text).await;
    let imported = if payload.is_empty() {
        0
    } else {
        state.store.mutate(|data| payload.apply(data)).await
    };

    info!(imported, "Smart import finished");
    HttpResponse::Ok().json(ImportResponse {
        imported,
        message: smart_import::import_message(imported),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_pitch).service(import_records);
}
