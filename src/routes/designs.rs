use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::design::{DesignForm, DesignPatch},
    error::AppResult,
    middleware::auth::AuthUser,
    models::design::{Design, DesignList},
    response::ApiResponse,
    routes::{multipart::read_form, params::DesignQuery},
    services::design_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_designs).post(create_design))
        .route("/mine", get(my_designs))
        .route(
            "/{id}",
            get(get_design).put(update_design).delete(delete_design),
        )
}

#[utoipa::path(
    get,
    path = "/api/design",
    params(DesignQuery),
    responses((status = 200, description = "Browse designs", body = ApiResponse<DesignList>)),
    tag = "Designs"
)]
pub async fn list_designs(
    State(state): State<AppState>,
    Query(query): Query<DesignQuery>,
) -> AppResult<Json<ApiResponse<DesignList>>> {
    Ok(Json(design_service::list_designs(&state, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/design",
    request_body(content_type = "multipart/form-data", description = "Design fields plus an `image` file"),
    responses(
        (status = 200, description = "Design created", body = ApiResponse<Design>),
        (status = 400, description = "Validation failed or image missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn create_design(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Design>>> {
    let mut form = read_form(multipart).await?;
    let design = DesignForm::from_fields(&form.fields)?;
    let image = form.take_file("image");
    Ok(Json(
        design_service::create_design(&state, &user, design, image).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/design/mine",
    responses((status = 200, description = "Designs of the current designer", body = ApiResponse<DesignList>)),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn my_designs(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DesignList>>> {
    Ok(Json(design_service::my_designs(&state, &user).await?))
}

#[utoipa::path(
    get,
    path = "/api/design/{id}",
    params(("id" = Uuid, Path, description = "Design ID")),
    responses(
        (status = 200, description = "Design", body = ApiResponse<Design>),
        (status = 404, description = "Design not found")
    ),
    tag = "Designs"
)]
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Design>>> {
    Ok(Json(design_service::get_design(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/design/{id}",
    params(("id" = Uuid, Path, description = "Design ID")),
    request_body(content_type = "multipart/form-data", description = "Changed fields and an optional new `image`"),
    responses((status = 200, description = "Design updated", body = ApiResponse<Design>)),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn update_design(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Design>>> {
    let mut form = read_form(multipart).await?;
    let patch = DesignPatch::from_fields(&form.fields)?;
    let image = form.take_file("image");
    Ok(Json(
        design_service::update_design(&state, &user, id, patch, image).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/design/{id}",
    params(("id" = Uuid, Path, description = "Design ID")),
    responses((status = 200, description = "Design deleted", body = ApiResponse<serde_json::Value>)),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn delete_design(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(design_service::delete_design(&state, &user, id).await?))
}
