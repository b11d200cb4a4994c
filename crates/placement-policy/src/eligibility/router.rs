use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CompanyId, NewStudent, StudentId};
use super::policy::PolicyConfig;
use super::repository::{PlacementRepository, PolicyStore};
use super::service::{EligibilityService, EligibilityServiceError};
use crate::error::eligibility_status;

/// Body of an eligibility check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCheckRequest {
    pub student_id: StudentId,
    pub company_id: CompanyId,
}

/// Router builder exposing the eligibility, policy, and roster endpoints.
pub fn eligibility_router<R, P>(service: Arc<EligibilityService<R, P>>) -> Router
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/check", post(check_handler::<R, P>))
        .route("/api/v1/policies", get(policies_handler::<R, P>))
        .route(
            "/api/v1/policies/configure",
            post(configure_policies_handler::<R, P>),
        )
        .route(
            "/api/v1/students",
            get(students_handler::<R, P>).post(create_student_handler::<R, P>),
        )
        .route(
            "/api/v1/students/:student_id",
            get(student_handler::<R, P>),
        )
        .route("/api/v1/companies", get(companies_handler::<R, P>))
        .route(
            "/api/v1/companies/:company_id/eligible-students",
            get(eligible_students_handler::<R, P>),
        )
        .with_state(service)
}

pub(crate) async fn check_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
    axum::Json(request): axum::Json<EligibilityCheckRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.decide(request.student_id, &request.company_id) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligible_students_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
    Path(company_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.eligible_students(&CompanyId(company_id)) {
        Ok(batch) => (StatusCode::OK, axum::Json(batch.students)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn policies_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.policy_config() {
        Ok(config) => (StatusCode::OK, axum::Json(config)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn configure_policies_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
    axum::Json(config): axum::Json<PolicyConfig>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.update_policy_config(config) {
        Ok(config) => (StatusCode::OK, axum::Json(config)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn students_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.students() {
        Ok(students) => (StatusCode::OK, axum::Json(students)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
    Path(student_id): Path<u64>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.student(StudentId(student_id)) {
        Ok(student) => (StatusCode::OK, axum::Json(student)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_student_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
    axum::Json(student): axum::Json<NewStudent>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.create_student(student) {
        Ok(student) => (StatusCode::CREATED, axum::Json(student)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn companies_handler<R, P>(
    State(service): State<Arc<EligibilityService<R, P>>>,
) -> Response
where
    R: PlacementRepository + 'static,
    P: PolicyStore + 'static,
{
    match service.companies() {
        Ok(companies) => (StatusCode::OK, axum::Json(companies)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (eligibility_status(&error), axum::Json(payload)).into_response()
}
