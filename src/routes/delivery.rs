use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::delivery::{
        AssignDeliveryRequest, ReleaseDeliveryPaymentRequest, UpdateDeliveryStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::delivery::{DeliveryJob, DeliveryJobList, DeliveryKind},
    response::ApiResponse,
    routes::params::DeliveryQueueQuery,
    services::delivery_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(list_delivery_queue))
        .route("/{kind}/{id}/assign", post(assign_delivery))
        .route("/{kind}/{id}/status", patch(update_delivery_status))
        .route("/{kind}/{id}/collect-cash", post(collect_cash))
        .route("/{kind}/{id}/release-payment", post(release_delivery_payment))
}

#[utoipa::path(
    get,
    path = "/api/delivery/queue",
    params(DeliveryQueueQuery),
    responses((status = 200, description = "Orders waiting for or out on delivery", body = ApiResponse<DeliveryJobList>)),
    security(("bearer_auth" = [])),
    tag = "Delivery"
)]
pub async fn list_delivery_queue(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DeliveryQueueQuery>,
) -> AppResult<Json<ApiResponse<DeliveryJobList>>> {
    Ok(Json(
        delivery_service::list_delivery_queue(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/delivery/{kind}/{id}/assign",
    params(
        ("kind" = DeliveryKind, Path, description = "`orders` or `custom-orders`"),
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = AssignDeliveryRequest,
    responses(
        (status = 200, description = "Driver assigned", body = ApiResponse<DeliveryJob>),
        (status = 400, description = "Order is not ready for delivery")
    ),
    security(("bearer_auth" = [])),
    tag = "Delivery"
)]
pub async fn assign_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(DeliveryKind, Uuid)>,
    Json(payload): Json<AssignDeliveryRequest>,
) -> AppResult<Json<ApiResponse<DeliveryJob>>> {
    Ok(Json(
        delivery_service::assign_delivery(&state, &user, kind, id, payload).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/delivery/{kind}/{id}/status",
    params(
        ("kind" = DeliveryKind, Path, description = "`orders` or `custom-orders`"),
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateDeliveryStatusRequest,
    responses(
        (status = 200, description = "Delivery status changed", body = ApiResponse<DeliveryJob>),
        (status = 400, description = "Transition not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Delivery"
)]
pub async fn update_delivery_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(DeliveryKind, Uuid)>,
    Json(payload): Json<UpdateDeliveryStatusRequest>,
) -> AppResult<Json<ApiResponse<DeliveryJob>>> {
    Ok(Json(
        delivery_service::update_delivery_status(&state, &user, kind, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/delivery/{kind}/{id}/collect-cash",
    params(
        ("kind" = DeliveryKind, Path, description = "`orders` or `custom-orders`"),
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses((status = 200, description = "Cash collected", body = ApiResponse<DeliveryJob>)),
    security(("bearer_auth" = [])),
    tag = "Delivery"
)]
pub async fn collect_cash(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(DeliveryKind, Uuid)>,
) -> AppResult<Json<ApiResponse<DeliveryJob>>> {
    Ok(Json(
        delivery_service::collect_cash(&state, &user, kind, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/delivery/{kind}/{id}/release-payment",
    params(
        ("kind" = DeliveryKind, Path, description = "`orders` or `custom-orders`"),
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = ReleaseDeliveryPaymentRequest,
    responses(
        (status = 200, description = "Delivery payment released", body = ApiResponse<DeliveryJob>),
        (status = 400, description = "Nothing collected or already released")
    ),
    security(("bearer_auth" = [])),
    tag = "Delivery"
)]
pub async fn release_delivery_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(DeliveryKind, Uuid)>,
    Json(payload): Json<ReleaseDeliveryPaymentRequest>,
) -> AppResult<Json<ApiResponse<DeliveryJob>>> {
    Ok(Json(
        delivery_service::release_delivery_payment(&state, &user, kind, id, payload).await?,
    ))
}
