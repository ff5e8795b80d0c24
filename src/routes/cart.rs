use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::design::{Cart, CartLine},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/{design_id}", put(update_cart_item).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses((status = 200, description = "Cart with live availability", body = ApiResponse<Cart>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    Ok(Json(cart_service::get_cart(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add or top up a cart line", body = ApiResponse<CartLine>),
        (status = 400, description = "Bad request"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartLine>>> {
    Ok(Json(cart_service::add_to_cart(&state, &user, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/cart/{design_id}",
    params(("design_id" = Uuid, Path, description = "Design ID")),
    request_body = UpdateCartItemRequest,
    responses((status = 200, description = "Cart line updated", body = ApiResponse<CartLine>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(design_id): Path<Uuid>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartLine>>> {
    Ok(Json(
        cart_service::update_cart_item(&state, &user, design_id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{design_id}",
    params(("design_id" = Uuid, Path, description = "Design ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(design_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        cart_service::remove_from_cart(&state, &user, design_id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses((status = 200, description = "Cart emptied", body = ApiResponse<serde_json::Value>)),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(cart_service::clear_cart(&state, &user).await?))
}
