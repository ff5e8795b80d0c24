use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{error::AppResult, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_file))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "Stored file ID")),
    responses(
        (status = 200, description = "File bytes with their content type"),
        (status = 404, description = "File not found")
    ),
    tag = "Files"
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let file = state.files.load(&state.orm, id).await?;
    let disposition = format!("inline; filename=\"{}\"", file.filename.replace('"', ""));
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        file.data,
    ))
}
