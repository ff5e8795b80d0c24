use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{custom_order::CustomOrder, order::Order},
    response::ApiResponse,
    routes::multipart::read_form,
    services::{custom_order_service, file_service::UploadedFile, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders/{id}", post(upload_order_bank_slip))
        .route("/custom-orders/{id}", post(upload_custom_order_bank_slip))
}

async fn slip_from(multipart: Multipart) -> AppResult<UploadedFile> {
    read_form(multipart)
        .await?
        .take_file("bankSlip")
        .ok_or_else(|| AppError::bad_request("bankSlip file is required"))
}

#[utoipa::path(
    post,
    path = "/api/bankSlip/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body(content_type = "multipart/form-data", description = "A `bankSlip` image"),
    responses(
        (status = 200, description = "Slip stored, payment pending review", body = ApiResponse<Order>),
        (status = 400, description = "Payment method or state does not accept a slip")
    ),
    security(("bearer_auth" = [])),
    tag = "Bank slips"
)]
pub async fn upload_order_bank_slip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Order>>> {
    let slip = slip_from(multipart).await?;
    Ok(Json(
        order_service::upload_bank_slip(&state, &user, id, slip).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/bankSlip/custom-orders/{id}",
    params(("id" = Uuid, Path, description = "Custom order ID")),
    request_body(content_type = "multipart/form-data", description = "A `bankSlip` image"),
    responses(
        (status = 200, description = "Slip stored, payment pending review", body = ApiResponse<CustomOrder>),
        (status = 400, description = "Payment method or state does not accept a slip")
    ),
    security(("bearer_auth" = [])),
    tag = "Bank slips"
)]
pub async fn upload_custom_order_bank_slip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<CustomOrder>>> {
    let slip = slip_from(multipart).await?;
    Ok(Json(
        custom_order_service::upload_bank_slip(&state, &user, id, slip).await?,
    ))
}
