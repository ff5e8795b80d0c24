use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::inventory::{SupplierPatch, SupplierRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::inventory::{Supplier, SupplierList},
    response::ApiResponse,
    routes::params::SupplierQuery,
    services::supplier_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = SupplierRequest,
    responses((status = 200, description = "Supplier created", body = ApiResponse<Supplier>)),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SupplierRequest>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(
        supplier_service::create_supplier(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    params(SupplierQuery),
    responses((status = 200, description = "Suppliers", body = ApiResponse<SupplierList>)),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SupplierQuery>,
) -> AppResult<Json<ApiResponse<SupplierList>>> {
    Ok(Json(
        supplier_service::list_suppliers(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Supplier not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(supplier_service::get_supplier(&state, &user, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    request_body = SupplierPatch,
    responses((status = 200, description = "Supplier updated", body = ApiResponse<Supplier>)),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPatch>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(
        supplier_service::update_supplier(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Supplier still has purchase orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        supplier_service::delete_supplier(&state, &user, id).await?,
    ))
}
