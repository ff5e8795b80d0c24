use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::finance::{CreateSalaryRequest, UpdateSalaryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::finance::{Salary, SalaryList},
    response::ApiResponse,
    routes::params::SalaryQuery,
    services::salary_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_salaries).post(create_salary))
        .route("/mine", get(my_salaries))
        .route(
            "/{id}",
            get(get_salary).put(update_salary).delete(delete_salary),
        )
        .route("/{id}/pay", post(mark_salary_paid))
}

#[utoipa::path(
    post,
    path = "/api/staff-designer-salaries",
    request_body = CreateSalaryRequest,
    responses(
        (status = 200, description = "Payslip created", body = ApiResponse<Salary>),
        (status = 400, description = "Invalid period or payslip already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn create_salary(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSalaryRequest>,
) -> AppResult<Json<ApiResponse<Salary>>> {
    Ok(Json(salary_service::create_salary(&state, &user, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/staff-designer-salaries",
    params(SalaryQuery),
    responses((status = 200, description = "Payslips", body = ApiResponse<SalaryList>)),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn list_salaries(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SalaryQuery>,
) -> AppResult<Json<ApiResponse<SalaryList>>> {
    Ok(Json(salary_service::list_salaries(&state, &user, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/staff-designer-salaries/mine",
    responses((status = 200, description = "Payslips of the current staff designer", body = ApiResponse<SalaryList>)),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn my_salaries(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SalaryList>>> {
    Ok(Json(salary_service::my_salaries(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/staff-designer-salaries/{id}",
    params(("id" = Uuid, Path, description = "Salary ID")),
    responses(
        (status = 200, description = "Payslip", body = ApiResponse<Salary>),
        (status = 404, description = "Payslip not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn get_salary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Salary>>> {
    Ok(Json(salary_service::get_salary(&state, &user, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/staff-designer-salaries/{id}",
    params(("id" = Uuid, Path, description = "Salary ID")),
    request_body = UpdateSalaryRequest,
    responses((status = 200, description = "Payslip recalculated", body = ApiResponse<Salary>)),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn update_salary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalaryRequest>,
) -> AppResult<Json<ApiResponse<Salary>>> {
    Ok(Json(
        salary_service::update_salary(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/staff-designer-salaries/{id}/pay",
    params(("id" = Uuid, Path, description = "Salary ID")),
    responses((status = 200, description = "Payslip marked paid", body = ApiResponse<Salary>)),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn mark_salary_paid(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Salary>>> {
    Ok(Json(salary_service::mark_salary_paid(&state, &user, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/staff-designer-salaries/{id}",
    params(("id" = Uuid, Path, description = "Salary ID")),
    responses((status = 200, description = "Payslip deleted", body = ApiResponse<serde_json::Value>)),
    security(("bearer_auth" = [])),
    tag = "Salaries"
)]
pub async fn delete_salary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(salary_service::delete_salary(&state, &user, id).await?))
}
