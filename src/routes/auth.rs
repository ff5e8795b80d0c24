use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::user::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me))
}

#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register a customer or designer", body = ApiResponse<User>),
        (status = 400, description = "Validation failed or email taken")
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::register_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/me",
    responses((status = 200, description = "Current user", body = ApiResponse<User>)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(auth_service::me(&state, &user).await?))
}

#[utoipa::path(
    put,
    path = "/api/user/me",
    request_body = UpdateProfileRequest,
    responses((status = 200, description = "Profile updated", body = ApiResponse<User>)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(auth_service::update_me(&state, &user, payload).await?))
}
