use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::inventory::{CreateMaterialRequest, ReviewMaterialRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::inventory::{MaterialRequest, MaterialRequestList},
    response::ApiResponse,
    routes::params::StatusQuery,
    services::material_request_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_material_requests).post(create_material_request))
        .route("/mine", get(list_my_material_requests))
        .route("/{id}/approve", post(approve_material_request))
        .route("/{id}/reject", post(reject_material_request))
}

#[utoipa::path(
    post,
    path = "/api/material-requests",
    request_body = CreateMaterialRequest,
    responses((status = 200, description = "Request submitted", body = ApiResponse<MaterialRequest>)),
    security(("bearer_auth" = [])),
    tag = "Material requests"
)]
pub async fn create_material_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMaterialRequest>,
) -> AppResult<Json<ApiResponse<MaterialRequest>>> {
    Ok(Json(
        material_request_service::create_material_request(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/material-requests/mine",
    responses((status = 200, description = "Requests of the current designer", body = ApiResponse<MaterialRequestList>)),
    security(("bearer_auth" = [])),
    tag = "Material requests"
)]
pub async fn list_my_material_requests(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MaterialRequestList>>> {
    Ok(Json(
        material_request_service::list_my_material_requests(&state, &user).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/material-requests",
    params(StatusQuery),
    responses((status = 200, description = "All material requests", body = ApiResponse<MaterialRequestList>)),
    security(("bearer_auth" = [])),
    tag = "Material requests"
)]
pub async fn list_material_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<MaterialRequestList>>> {
    Ok(Json(
        material_request_service::list_material_requests(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/material-requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Material request ID")),
    request_body = ReviewMaterialRequest,
    responses(
        (status = 200, description = "Approved and stock released", body = ApiResponse<MaterialRequest>),
        (status = 400, description = "Not pending or stock too low")
    ),
    security(("bearer_auth" = [])),
    tag = "Material requests"
)]
pub async fn approve_material_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewMaterialRequest>,
) -> AppResult<Json<ApiResponse<MaterialRequest>>> {
    Ok(Json(
        material_request_service::approve_material_request(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/material-requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Material request ID")),
    request_body = ReviewMaterialRequest,
    responses((status = 200, description = "Request rejected", body = ApiResponse<MaterialRequest>)),
    security(("bearer_auth" = [])),
    tag = "Material requests"
)]
pub async fn reject_material_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewMaterialRequest>,
) -> AppResult<Json<ApiResponse<MaterialRequest>>> {
    Ok(Json(
        material_request_service::reject_material_request(&state, &user, id, payload).await?,
    ))
}
