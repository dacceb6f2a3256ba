//! Contact API routes

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{bad_request, confirmation_required, not_found, AppState, ConfirmQuery, SearchQuery};
use crate::models::{ContactCategory, ContactDraft, ContactPatch, Partition};

#[derive(Debug, Deserialize)]
pub struct ContactsQuery {
    #[serde(default)]
    pub q: String,
    /// `All` or one category
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct CategoryItem {
    value: &'static str,
    label: &'static str,
    partition: &'static str,
}

/// Parse the category filter; `All` and empty mean no filter
fn category_filter(raw: Option<&str>) -> Result<Option<ContactCategory>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(all) if all.eq_ignore_ascii_case("all") => Ok(None),
        Some(other) => other.parse().map(Some),
    }
}

/// GET /contacts
#[get("")]
pub async fn list_contacts(
    state: web::Data<AppState>,
    query: web::Query<ContactsQuery>,
) -> impl Responder {
    let category = match category_filter(query.category.as_deref()) {
        Ok(c) => c,
        Err(e) => return bad_request(e),
    };

    let contacts = state
        .store
        .read(|data| data.search_contacts(&query.q, category));
    HttpResponse::Ok().json(contacts)
}

/// GET /contacts/label-artists
#[get("/label-artists")]
pub async fn list_label_artists(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let contacts = state
        .store
        .read(|data| data.search_partition(Partition::LabelArtists, &query.q));
    HttpResponse::Ok().json(contacts)
}

/// GET /contacts/platform-curators
#[get("/platform-curators")]
pub async fn list_platform_curators(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let contacts = state
        .store
        .read(|data| data.search_partition(Partition::PlatformCurators, &query.q));
    HttpResponse::Ok().json(contacts)
}

/// GET /contacts/categories
#[get("/categories")]
pub async fn list_categories() -> impl Responder {
    let categories: Vec<CategoryItem> = ContactCategory::ALL
        .iter()
        .map(|c| CategoryItem {
            value: c.as_str(),
            label: c.label(),
            partition: c.partition().as_str(),
        })
        .collect();
    HttpResponse::Ok().json(categories)
}

/// POST /contacts
#[post("")]
pub async fn create_contact(
    state: web::Data<AppState>,
    body: web::Json<ContactDraft>,
) -> impl Responder {
    let draft = body.into_inner();
    let contact = state
        .store
        .mutate(|data| data.create_contact(draft))
        .await;

    info!(id = %contact.id, category = %contact.category, "Created contact");
    HttpResponse::Created().json(contact)
}

/// GET /contacts/{id}
#[get("/{id}")]
pub async fn get_contact(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match state.store.read(|data| data.find_contact(&id).cloned()) {
        Some(contact) => HttpResponse::Ok().json(contact),
        None => not_found("Contact", &id),
    }
}

/// PUT /contacts/{id}
#[put("/{id}")]
pub async fn update_contact(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ContactPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    match state
        .store
        .mutate(|data| data.update_contact(&id, patch))
        .await
    {
        Some(contact) => HttpResponse::Ok().json(contact),
        None => not_found("Contact", &id),
    }
}

/// DELETE /contacts/{id}?confirm=true
#[delete("/{id}")]
pub async fn delete_contact(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> impl Responder {
    let id = path.into_inner();
    if !query.confirm {
        return confirmation_required();
    }

    match state.store.mutate(|data| data.delete_contact(&id)).await {
        Some(contact) => {
            info!(id = %contact.id, "Deleted contact");
            HttpResponse::Ok().json(contact)
        }
        None => not_found("Contact", &id),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_contacts)
        .service(list_label_artists)
        .service(list_platform_curators)
        .service(list_categories)
        .service(create_contact)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_state;
    use crate::models::Contact;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    #[test]
    fn test_category_filter() {
        assert_eq!(category_filter(None), Ok(None));
        assert_eq!(category_filter(Some("All")), Ok(None));
        assert_eq!(
            category_filter(Some("Media")),
            Ok(Some(ContactCategory::Media))
        );
        assert!(category_filter(Some("Podcast")).is_err());
    }

    #[actix_web::test]
    async fn test_list_and_filter() {
        let state = sample_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/contacts").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/contacts").to_request();
        let all: Vec<Contact> = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);

        let req = actix_test::TestRequest::get()
            .uri("/contacts?category=Artist")
            .to_request();
        let artists: Vec<Contact> = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].id, "2");

        let req = actix_test::TestRequest::get()
            .uri("/contacts?category=Podcast")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = actix_test::TestRequest::get()
            .uri("/contacts/platform-curators?q=spotify")
            .to_request();
        let curators: Vec<Contact> = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(curators.len(), 1);

        let req = actix_test::TestRequest::get()
            .uri("/contacts/categories")
            .to_request();
        let categories: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(categories[4]["value"], "Label Artist");
        assert_eq!(categories[4]["partition"], "label_artists");
    }

    #[actix_web::test]
    async fn test_create_edit_delete() {
        let state = sample_state();
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/contacts").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/contacts")
            .set_json(json!({"name": "Новый артист", "category": "Label Artist", "tags": "Pop, Dance"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Contact = actix_test::read_body_json(resp).await;
        assert_eq!(created.tags, vec!["Pop", "Dance"]);
        assert_eq!(state.store.read(|d| d.label_artists[0].id.clone()), created.id);

        let req = actix_test::TestRequest::put()
            .uri(&format!("/contacts/{}", created.id))
            .set_json(json!({"category": "Media"}))
            .to_request();
        let moved: Contact = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(moved.category, ContactCategory::Media);
        assert_eq!(state.store.read(|d| d.contacts[0].id.clone()), created.id);
        assert!(state.store.read(|d| d.partitions_consistent()));

        let uri = format!("/contacts/{}", created.id);
        let req = actix_test::TestRequest::delete().uri(&uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(state.store.read(|d| d.find_contact(&created.id).is_some()));

        let req = actix_test::TestRequest::delete()
            .uri(&format!("{}?confirm=true", uri))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get().uri(&uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_unknown_contact() {
        let app = actix_test::init_service(
            App::new()
                .app_data(sample_state())
                .service(web::scope("/contacts").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::put()
            .uri("/contacts/missing")
            .set_json(json!({"name": "X"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
