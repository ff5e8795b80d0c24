use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::admin::{CreateUserRequest, Dashboard},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{
        order::OrderWithItemsList,
        user::{User, UserList},
    },
    response::ApiResponse,
    routes::params::{OrderListQuery, UserQuery},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", delete(delete_user))
        .route("/dashboard", get(dashboard))
        .route("/orders", get(list_orders))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserQuery),
    responses((status = 200, description = "Users", body = ApiResponse<UserList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    Ok(Json(admin_service::list_users(&state, &user, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses((status = 200, description = "User of any role created", body = ApiResponse<User>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(admin_service::create_user(&state, &user, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Cannot delete yourself")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(admin_service::delete_user(&state, &user, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses((status = 200, description = "Platform counters", body = ApiResponse<Dashboard>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    Ok(Json(admin_service::dashboard(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses((status = 200, description = "All marketplace orders", body = ApiResponse<OrderWithItemsList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderWithItemsList>>> {
    Ok(Json(admin_service::list_orders(&state, &user, query).await?))
}
