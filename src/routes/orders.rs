use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::order::{Order, OrderWithItems, OrderWithItemsList},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_orders).post(create_order))
        .route("/all", get(list_all_orders))
        .route("/designer", get(list_designer_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/status", patch(update_order_status))
        .route("/{id}/cancel", post(cancel_order))
        .route("/{id}/approve-payment", post(approve_payment))
        .route("/{id}/deny-payment", post(deny_payment))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed and stock deducted", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Invalid items or insufficient stock")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    Ok(Json(order_service::create_order(&state, &user, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderListQuery),
    responses((status = 200, description = "Orders of the current customer", body = ApiResponse<OrderWithItemsList>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderWithItemsList>>> {
    Ok(Json(order_service::list_my_orders(&state, &user, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/all",
    params(OrderListQuery),
    responses((status = 200, description = "All orders", body = ApiResponse<OrderWithItemsList>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderWithItemsList>>> {
    Ok(Json(order_service::list_all_orders(&state, &user, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/designer",
    responses((status = 200, description = "Orders containing the designer's work", body = ApiResponse<OrderWithItemsList>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_designer_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderWithItemsList>>> {
    Ok(Json(order_service::list_designer_orders(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with lines", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    Ok(Json(order_service::get_order(&state, &user, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<Order>),
        (status = 400, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::update_order_status(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses((status = 200, description = "Order cancelled and stock restored", body = ApiResponse<Order>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::cancel_order(&state, &user, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/approve-payment",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses((status = 200, description = "Bank payment approved", body = ApiResponse<Order>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn approve_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::approve_payment(&state, &user, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/deny-payment",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses((status = 200, description = "Bank payment denied, order cancelled", body = ApiResponse<Order>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn deny_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::deny_payment(&state, &user, id).await?))
}
