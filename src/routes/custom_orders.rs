use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{AcceptCustomOrderRequest, CustomOrderForm, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::custom_order::{CustomOrder, CustomOrderList},
    response::ApiResponse,
    routes::{multipart::read_form, params::StatusQuery},
    services::custom_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_custom_orders).post(create_custom_order))
        .route("/all", get(list_custom_orders))
        .route("/{id}", get(get_custom_order))
        .route("/{id}/accept", post(accept_custom_order))
        .route("/{id}/status", patch(update_custom_order_status))
        .route("/{id}/cancel", post(cancel_custom_order))
        .route("/{id}/approve-payment", post(approve_custom_payment))
        .route("/{id}/deny-payment", post(deny_custom_payment))
}

#[utoipa::path(
    post,
    path = "/api/customOrder",
    request_body(
        content_type = "multipart/form-data",
        description = "Order fields, optional `referenceImage`, and `bankSlip` for bank payments"
    ),
    responses(
        (status = 200, description = "Custom order placed", body = ApiResponse<CustomOrder>),
        (status = 400, description = "Validation failed or bank slip missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn create_custom_order(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    let mut form = read_form(multipart).await?;
    let order = CustomOrderForm::from_fields(&form.fields)?;
    let reference = form.take_file("referenceImage");
    let slip = form.take_file("bankSlip");
    Ok(Json(
        custom_order_service::create_custom_order(&state, &user, order, reference, slip).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/customOrder",
    params(StatusQuery),
    responses((status = 200, description = "Custom orders of the current customer", body = ApiResponse<CustomOrderList>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn list_my_custom_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<CustomOrderList>>> {
    Ok(Json(
        custom_order_service::list_my_custom_orders(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/customOrder/all",
    params(StatusQuery),
    responses((status = 200, description = "All custom orders", body = ApiResponse<CustomOrderList>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn list_custom_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<CustomOrderList>>> {
    Ok(Json(
        custom_order_service::list_custom_orders(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/customOrder/{id}",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    responses(
        (status = 200, description = "Custom order", body = ApiResponse<CustomOrder>),
        (status = 404, description = "Custom order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn get_custom_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::get_custom_order(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/customOrder/{id}/accept",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    request_body = AcceptCustomOrderRequest,
    responses((status = 200, description = "Accepted and priced", body = ApiResponse<CustomOrder>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn accept_custom_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcceptCustomOrderRequest>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::accept_custom_order(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/customOrder/{id}/status",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<CustomOrder>),
        (status = 400, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn update_custom_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::update_custom_order_status(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/customOrder/{id}/cancel",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    responses((status = 200, description = "Custom order cancelled", body = ApiResponse<CustomOrder>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn cancel_custom_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::cancel_custom_order(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/customOrder/{id}/approve-payment",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    responses((status = 200, description = "Bank payment approved", body = ApiResponse<CustomOrder>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn approve_custom_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::approve_custom_payment(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/customOrder/{id}/deny-payment",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    responses((status = 200, description = "Bank payment denied, order cancelled", body = ApiResponse<CustomOrder>)),
    security(("bearer_auth" = [])),
    tag = "Custom orders"
)]
pub async fn deny_custom_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    Ok(Json(
        custom_order_service::deny_custom_payment(&state, &user, id).await?,
    ))
}
