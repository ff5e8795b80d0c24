use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::inventory::{StockReleaseRequest, UpdateStockRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::inventory::{StockItem, StockList, StockReleaseList, StockReleaseResult, StockSeedResult},
    response::ApiResponse,
    routes::params::StockQuery,
    services::stock_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock))
        .route("/initialize", post(initialize_stock))
        .route("/reset", post(reset_stock))
        .route("/randomize-prices", post(randomize_prices))
        .route("/low", get(low_stock))
        .route("/releases", get(list_releases))
        .route("/release", post(release_stock))
        .route("/{id}", get(get_stock).patch(update_stock))
}

#[utoipa::path(
    get,
    path = "/api/stock",
    params(StockQuery),
    responses((status = 200, description = "Stock rows", body = ApiResponse<StockList>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn list_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<ApiResponse<StockList>>> {
    Ok(Json(stock_service::list_stock(&state, &user, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/stock/initialize",
    responses((status = 200, description = "Missing combinations created", body = ApiResponse<StockSeedResult>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn initialize_stock(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StockSeedResult>>> {
    Ok(Json(stock_service::initialize_stock(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/stock/reset",
    responses((status = 200, description = "Every combination reset to zero", body = ApiResponse<StockSeedResult>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn reset_stock(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StockSeedResult>>> {
    Ok(Json(stock_service::reset_stock(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/stock/randomize-prices",
    responses((status = 200, description = "New placeholder prices", body = ApiResponse<StockList>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn randomize_prices(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StockList>>> {
    Ok(Json(stock_service::randomize_prices(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/stock/low",
    responses((status = 200, description = "Rows at or below their reorder level", body = ApiResponse<StockList>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StockList>>> {
    Ok(Json(stock_service::low_stock(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/stock/releases",
    responses((status = 200, description = "Stock handed to designers", body = ApiResponse<StockReleaseList>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn list_releases(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StockReleaseList>>> {
    Ok(Json(stock_service::list_releases(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/stock/release",
    request_body = StockReleaseRequest,
    responses(
        (status = 200, description = "Stock released", body = ApiResponse<StockReleaseResult>),
        (status = 400, description = "Release would cross the minimum level")
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn release_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<StockReleaseRequest>,
) -> AppResult<Json<ApiResponse<StockReleaseResult>>> {
    Ok(Json(
        stock_service::release_stock(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/stock/{id}",
    params(("id" = Uuid, Path, description = "Stock row ID")),
    responses(
        (status = 200, description = "Stock row", body = ApiResponse<StockItem>),
        (status = 404, description = "Stock row not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StockItem>>> {
    Ok(Json(stock_service::get_stock(&state, &user, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/stock/{id}",
    params(("id" = Uuid, Path, description = "Stock row ID")),
    request_body = UpdateStockRequest,
    responses((status = 200, description = "Stock row updated", body = ApiResponse<StockItem>)),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<StockItem>>> {
    Ok(Json(
        stock_service::update_stock(&state, &user, id, payload).await?,
    ))
}
