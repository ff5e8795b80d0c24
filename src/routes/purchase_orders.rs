use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::inventory::CreatePurchaseOrderRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::inventory::{PurchaseOrder, PurchaseOrderList},
    response::ApiResponse,
    routes::params::StatusQuery,
    services::purchase_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route("/{id}", get(get_purchase_order))
        .route("/{id}/approve", post(approve_purchase_order))
        .route("/{id}/cancel", post(cancel_purchase_order))
        .route("/{id}/receive", post(receive_purchase_order))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders",
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 200, description = "Purchase order created", body = ApiResponse<PurchaseOrder>),
        (status = 400, description = "Inactive supplier or invalid lines")
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePurchaseOrderRequest>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    Ok(Json(
        purchase_order_service::create_purchase_order(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders",
    params(StatusQuery),
    responses((status = 200, description = "Purchase orders", body = ApiResponse<PurchaseOrderList>)),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<PurchaseOrderList>>> {
    Ok(Json(
        purchase_order_service::list_purchase_orders(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Purchase order", body = ApiResponse<PurchaseOrder>),
        (status = 404, description = "Purchase order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    Ok(Json(
        purchase_order_service::get_purchase_order(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders/{id}/approve",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses((status = 200, description = "Purchase order approved", body = ApiResponse<PurchaseOrder>)),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn approve_purchase_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    Ok(Json(
        purchase_order_service::approve_purchase_order(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses((status = 200, description = "Purchase order cancelled", body = ApiResponse<PurchaseOrder>)),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn cancel_purchase_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    Ok(Json(
        purchase_order_service::cancel_purchase_order(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/purchase-orders/{id}/receive",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Goods received into stock", body = ApiResponse<PurchaseOrder>),
        (status = 400, description = "Already received or cancelled")
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase orders"
)]
pub async fn receive_purchase_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    Ok(Json(
        purchase_order_service::receive_purchase_order(&state, &user, id).await?,
    ))
}
