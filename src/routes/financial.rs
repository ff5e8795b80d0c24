use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::finance::ReleaseDesignerPaymentRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::finance::{
        DesignerEarnings, DesignerPayment, DesignerPaymentList, FinancialSummary, MonthlyReport,
        PendingDesignerPaymentList,
    },
    response::ApiResponse,
    routes::params::{DateRangeQuery, DesignerPaymentQuery, YearQuery},
    services::{designer_payment_service, financial_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/monthly", get(monthly))
        .route(
            "/designer-payments",
            get(list_designer_payments).post(release_designer_payment),
        )
        .route("/designer-payments/pending", get(list_pending_designer_payments))
        .route("/designer-payments/mine", get(my_designer_payments))
}

#[utoipa::path(
    get,
    path = "/api/financial/summary",
    params(DateRangeQuery),
    responses((status = 200, description = "Revenue, costs and profit", body = ApiResponse<FinancialSummary>)),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<ApiResponse<FinancialSummary>>> {
    Ok(Json(financial_service::summary(&state, &user, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/financial/monthly",
    params(YearQuery),
    responses((status = 200, description = "Per-month totals for a year", body = ApiResponse<MonthlyReport>)),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn monthly(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<ApiResponse<MonthlyReport>>> {
    Ok(Json(financial_service::monthly(&state, &user, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/financial/designer-payments",
    request_body = ReleaseDesignerPaymentRequest,
    responses(
        (status = 200, description = "Designer paid for an order line", body = ApiResponse<DesignerPayment>),
        (status = 400, description = "Order unpaid or line already paid")
    ),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn release_designer_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ReleaseDesignerPaymentRequest>,
) -> AppResult<Json<ApiResponse<DesignerPayment>>> {
    Ok(Json(
        designer_payment_service::release_designer_payment(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/financial/designer-payments",
    params(DesignerPaymentQuery),
    responses((status = 200, description = "Released designer payments", body = ApiResponse<DesignerPaymentList>)),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn list_designer_payments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DesignerPaymentQuery>,
) -> AppResult<Json<ApiResponse<DesignerPaymentList>>> {
    Ok(Json(
        designer_payment_service::list_designer_payments(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/financial/designer-payments/pending",
    responses((status = 200, description = "Paid order lines awaiting payout", body = ApiResponse<PendingDesignerPaymentList>)),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn list_pending_designer_payments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PendingDesignerPaymentList>>> {
    Ok(Json(
        designer_payment_service::list_pending_designer_payments(&state, &user).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/financial/designer-payments/mine",
    responses((status = 200, description = "Earnings of the current designer", body = ApiResponse<DesignerEarnings>)),
    security(("bearer_auth" = [])),
    tag = "Financial"
)]
pub async fn my_designer_payments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DesignerEarnings>>> {
    Ok(Json(
        designer_payment_service::my_designer_payments(&state, &user).await?,
    ))
}
