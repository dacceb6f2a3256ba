//! Release plan API routes, including checklist tasks

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{bad_request, confirmation_required, not_found, AppState, ConfirmQuery, SearchQuery};
use crate::models::{PlanDraft, PlanPatch, ReleasePlan};

/// A plan as the client shows it, with its checklist progress
#[derive(Debug, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: ReleasePlan,
    /// Completed share of the checklist, 0..=100
    pub progress: u8,
}

impl From<ReleasePlan> for PlanView {
    fn from(plan: ReleasePlan) -> Self {
        let progress = plan.progress();
        Self { plan, progress }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTaskBody {
    #[serde(default)]
    pub label: String,
}

fn plan_response(plan: Option<ReleasePlan>, id: &str) -> HttpResponse {
    match plan {
        Some(plan) => HttpResponse::Ok().json(PlanView::from(plan)),
        None => not_found("Plan", id),
    }
}

/// GET /plans
#[get("")]
pub async fn list_plans(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let plans: Vec<PlanView> = state
        .store
        .read(|data| data.search_plans(&query.q))
        .into_iter()
        .map(PlanView::from)
        .collect();
    HttpResponse::Ok().json(plans)
}

/// POST /plans
#[post("")]
pub async fn create_plan(state: web::Data<AppState>, body: web::Json<PlanDraft>) -> impl Responder {
    let draft = body.into_inner();
    let plan = state.store.mutate(|data| data.create_plan(draft)).await;

    info!(id = %plan.id, title = %plan.title, tasks = plan.tasks.len(), "Created release plan");
    HttpResponse::Created().json(PlanView::from(plan))
}

/// PUT /plans/{id}
#[put("/{id}")]
pub async fn update_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PlanPatch>,
) -> impl Responder {
    let id = path.into_inner();
    let patch = body.into_inner();

    let plan = state.store.mutate(|data| data.update_plan(&id, patch)).await;
    plan_response(plan, &id)
}

/// DELETE /plans/{id}?confirm=true
#[delete("/{id}")]
pub async fn delete_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> impl Responder {
    let id = path.into_inner();
    if !query.confirm {
        return confirmation_required();
    }

    let plan = state.store.mutate(|data| data.delete_plan(&id)).await;
    plan_response(plan, &id)
}

/// POST /plans/{id}/tasks
#[post("/{id}/tasks")]
pub async fn add_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AddTaskBody>,
) -> impl Responder {
    let id = path.into_inner();
    if body.label.trim().is_empty() {
        return bad_request("Task label must not be empty");
    }

    match state.store.mutate(|data| data.add_task(&id, &body.label)).await {
        Some(plan) => HttpResponse::Created().json(PlanView::from(plan)),
        None => not_found("Plan", &id),
    }
}

/// POST /plans/{id}/tasks/{task_id}/toggle
#[post("/{id}/tasks/{task_id}/toggle")]
pub async fn toggle_task(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (id, task_id) = path.into_inner();
    let plan = state
        .store
        .mutate(|data| data.toggle_task(&id, &task_id))
        .await;
    plan_response(plan, &format!("{}/{}", id, task_id))
}

/// DELETE /plans/{id}/tasks/{task_id}?confirm=true
#[delete("/{id}/tasks/{task_id}")]
pub async fn remove_task(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ConfirmQuery>,
) -> impl Responder {
    let (id, task_id) = path.into_inner();
    if !query.confirm {
        return confirmation_required();
    }

    let plan = state
        .store
        .mutate(|data| data.remove_task(&id, &task_id))
        .await;
    plan_response(plan, &format!("{}/{}", id, task_id))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_plans)
        .service(create_plan)
        .service(update_plan)
        .service(delete_plan)
        .service(add_task)
        .service(toggle_task)
        .service(remove_task);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_list_reports_progress() {
        let app = test::init_service(
            App::new()
                .app_data(sample_state())
                .service(web::scope("/plans").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get().uri("/plans").to_request();
        let plans: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plans[0]["id"], "rp1");
        assert_eq!(plans[0]["progress"], 50);
        assert_eq!(plans[0]["tasks"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_checklist_routes() {
        let state = sample_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(web::scope("/plans").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/plans/rp1/tasks/tsk3/toggle")
            .to_request();
        let plan: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan["tasks"][2]["completed"], true);
        assert_eq!(plan["tasks"][3]["completed"], false);
        assert_eq!(plan["progress"], 75);

        let req = test::TestRequest::post()
            .uri("/plans/rp1/tasks")
            .set_json(json!({"label": "  "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/plans/rp1/tasks")
            .set_json(json!({"label": "Релиз-пати"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let plan: Value = test::read_body_json(resp).await;
        let task_id = plan["tasks"][4]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/plans/rp1/tasks/{}?confirm=true", task_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.store.read(|d| d.release_plans[0].tasks.len()), 4);

        let req = test::TestRequest::post()
            .uri("/plans/rp1/tasks/missing/toggle")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_plan_gets_default_checklist() {
        let app = test::init_service(
            App::new()
                .app_data(sample_state())
                .service(web::scope("/plans").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/plans")
            .set_json(json!({"title": "Winter EP", "budget": "50 000 ₽"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let plan: Value = test::read_body_json(resp).await;
        assert_eq!(plan["tasks"][0]["label"], "Мастеринг");
        assert_eq!(plan["status"], "Planning");
        assert_eq!(plan["progress"], 0);
        assert_eq!(plan["budget"], "50 000 ₽");
    }
}
