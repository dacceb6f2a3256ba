//! Quick link API routes

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Serialize;

use super::{confirmation_required, not_found, AppState, ConfirmQuery};
use crate::models::{LinkDraft, LinkPatch, QuickLink};

/// A link card: the stored link plus the scheme-less address shown under its title
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    #[serde(flatten)]
    pub link: QuickLink,
    pub display_url: String,
}

impl From<QuickLink> for LinkView {
    fn from(link: QuickLink) -> Self {
        let display_url = link.display_url().to_string();
        Self { link, display_url }
    }
}

/// GET /links
#[get("")]
pub async fn list_links(state: web::Data<AppState>) -> impl Responder {
    let links: Vec<LinkView> = state
        .store
        .read(|data| data.links.clone())
        .into_iter()
        .map(LinkView::from)
        .collect();
    HttpResponse::Ok().json(links)
}

/// POST /links
#[post("")]
pub async fn create_link(state: web::Data<AppState>, body: web::Json<LinkDraft>) -> impl Responder {
    let draft = body.into_inner();
    let link = state.store.mutate(|data| data.create_link(draft)).await;
    HttpResponse::Created().json(LinkView::from(link))
}

/// PUT /links/{id}
#[put("/{id}")]
pub async fn update_link(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<LinkPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    match state.store.mutate(|data| data.update_link(&id, patch)).await {
        Some(link) => HttpResponse::Ok().json(LinkView::from(link)),
        None => not_found("Link", &id),
    }
}

/// DELETE /links/{id}?confirm=true
#[delete("/{id}")]
pub async fn delete_link(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> impl Responder {
    let id = path.into_inner();
    if !query.confirm {
        return confirmation_required();
    }

    match state.store.mutate(|data| data.delete_link(&id)).await {
        Some(link) => HttpResponse::Ok().json(LinkView::from(link)),
        None => not_found("Link", &id),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_links)
        .service(create_link)
        .service(update_link)
        .service(delete_link);
}
