use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::finance::CreateSupplierPaymentRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::finance::{SupplierPayment, SupplierPaymentList},
    response::ApiResponse,
    routes::params::SupplierPaymentQuery,
    services::supplier_payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_supplier_payments).post(create_supplier_payment))
        .route(
            "/{id}",
            get(get_supplier_payment).delete(delete_supplier_payment),
        )
}

#[utoipa::path(
    post,
    path = "/api/supplier-payments",
    request_body = CreateSupplierPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<SupplierPayment>),
        (status = 400, description = "Amount exceeds the purchase order balance")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplier payments"
)]
pub async fn create_supplier_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSupplierPaymentRequest>,
) -> AppResult<Json<ApiResponse<SupplierPayment>>> {
    Ok(Json(
        supplier_payment_service::create_supplier_payment(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/supplier-payments",
    params(SupplierPaymentQuery),
    responses((status = 200, description = "Supplier payments", body = ApiResponse<SupplierPaymentList>)),
    security(("bearer_auth" = [])),
    tag = "Supplier payments"
)]
pub async fn list_supplier_payments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SupplierPaymentQuery>,
) -> AppResult<Json<ApiResponse<SupplierPaymentList>>> {
    Ok(Json(
        supplier_payment_service::list_supplier_payments(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/supplier-payments/{id}",
    params(("id" = Uuid, Path, description = "Supplier payment ID")),
    responses(
        (status = 200, description = "Supplier payment", body = ApiResponse<SupplierPayment>),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplier payments"
)]
pub async fn get_supplier_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SupplierPayment>>> {
    Ok(Json(
        supplier_payment_service::get_supplier_payment(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/supplier-payments/{id}",
    params(("id" = Uuid, Path, description = "Supplier payment ID")),
    responses((status = 200, description = "Payment deleted", body = ApiResponse<serde_json::Value>)),
    security(("bearer_auth" = [])),
    tag = "Supplier payments"
)]
pub async fn delete_supplier_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        supplier_payment_service::delete_supplier_payment(&state, &user, id).await?,
    ))
}
