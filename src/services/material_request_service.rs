use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        status::{RequestStatus, parse_stored, transition_error},
        stock::Combination,
    },
    dto::inventory::{CreateMaterialRequest, ReviewMaterialRequest},
    entity::{MaterialRequests, Stock, material_requests, stock},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::inventory::{MaterialRequest, MaterialRequestList},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::stock_service::{self, ReleaseOrder},
    state::AppState,
};

pub async fn create_material_request(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMaterialRequest,
) -> AppResult<ApiResponse<MaterialRequest>> {
    ensure_role(user, &[Role::Designer, Role::StaffDesigner])?;
    if payload.quantity <= 0 {
        return Err(AppError::bad_request("Quantity must be greater than 0"));
    }
    let combo = Combination::new(
        &payload.material,
        &payload.board_size,
        &payload.thickness,
        &payload.color,
    )
    .normalized()?;

    let model = material_requests::ActiveModel {
        requester_id: Set(user.user_id),
        material: Set(combo.material),
        board_size: Set(combo.board_size),
        thickness: Set(combo.thickness),
        color: Set(combo.color),
        quantity: Set(payload.quantity),
        reason: Set(payload.reason),
        status: Set(RequestStatus::Pending.to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "material_request_create",
        "material_requests",
        serde_json::json!({ "request_id": model.id, "request_code": model.request_code }),
    )
    .await;
    Ok(ApiResponse::success(
        "Material request submitted",
        model.into(),
        None,
    ))
}

pub async fn list_my_material_requests(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<MaterialRequestList>> {
    ensure_role(user, &[Role::Designer, Role::StaffDesigner])?;
    let items: Vec<MaterialRequest> = MaterialRequests::find()
        .filter(material_requests::Column::RequesterId.eq(user.user_id))
        .order_by_desc(material_requests::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MaterialRequest::from)
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        MaterialRequestList { items },
        Some(meta),
    ))
}

pub async fn list_material_requests(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<MaterialRequestList>> {
    ensure_role(user, &[Role::Inventory])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = MaterialRequests::find();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: RequestStatus = status.parse()?;
        finder = finder.filter(material_requests::Column::Status.eq(status.as_str()));
    }
    let finder = finder.order_by_asc(material_requests::Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MaterialRequest::from)
        .collect();
    Ok(ApiResponse::success(
        "Ok",
        MaterialRequestList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Claims a pending request for review. Only one reviewer wins the claim.
async fn claim_pending(state: &AppState, id: Uuid, next: RequestStatus) -> AppResult<()> {
    let updated = MaterialRequests::update_many()
        .col_expr(material_requests::Column::Status, Expr::value(next.as_str()))
        .filter(material_requests::Column::Id.eq(id))
        .filter(material_requests::Column::Status.eq(RequestStatus::Pending.as_str()))
        .exec(&state.orm)
        .await?;
    if updated.rows_affected == 0 {
        let current = find_request(state, id).await?;
        let from: RequestStatus = parse_stored(&current.status)?;
        return Err(transition_error("material request", from, next));
    }
    Ok(())
}

/// Approves a request by releasing the boards to the requester.
/// If the release fails the request goes back to `pending`.
pub async fn approve_material_request(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReviewMaterialRequest,
) -> AppResult<ApiResponse<MaterialRequest>> {
    ensure_role(user, &[Role::Inventory])?;
    let request = find_request(state, id).await?;
    let stock_row = Stock::find()
        .filter(stock::Column::Material.eq(request.material.as_str()))
        .filter(stock::Column::BoardSize.eq(request.board_size.as_str()))
        .filter(stock::Column::Thickness.eq(request.thickness.as_str()))
        .filter(stock::Column::Color.eq(request.color.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("No stock row for the requested combination"))?;

    claim_pending(state, id, RequestStatus::Approved).await?;
    let released = stock_service::perform_release(
        state,
        user,
        ReleaseOrder {
            stock_id: stock_row.id,
            designer_id: request.requester_id,
            quantity: request.quantity,
            notes: Some(format!("Material request {}", request.request_code)),
            material_request_id: Some(request.id),
        },
    )
    .await;
    let released = match released {
        Ok(released) => released,
        Err(err) => {
            let mut active: material_requests::ActiveModel = request.into();
            active.status = Set(RequestStatus::Pending.to_string());
            if let Err(revert) = active.update(&state.orm).await {
                tracing::warn!(error = %revert, "failed to return material request to pending");
            }
            return Err(err);
        }
    };

    let mut active: material_requests::ActiveModel = request.into();
    active.status = Set(RequestStatus::Approved.to_string());
    active.reviewed_by = Set(Some(user.user_id));
    active.review_note = Set(payload.note);
    active.stock_release_id = Set(Some(released.release.id));
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "material_request_approve",
        "material_requests",
        serde_json::json!({ "request_id": model.id, "release_id": released.release.id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Material request approved",
        model.into(),
        None,
    ))
}

pub async fn reject_material_request(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReviewMaterialRequest,
) -> AppResult<ApiResponse<MaterialRequest>> {
    ensure_role(user, &[Role::Inventory])?;
    claim_pending(state, id, RequestStatus::Rejected).await?;
    let mut active: material_requests::ActiveModel = find_request(state, id).await?.into();
    active.reviewed_by = Set(Some(user.user_id));
    active.review_note = Set(payload.note);
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "material_request_reject",
        "material_requests",
        serde_json::json!({ "request_id": model.id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Material request rejected",
        model.into(),
        None,
    ))
}

async fn find_request(state: &AppState, id: Uuid) -> AppResult<material_requests::Model> {
    MaterialRequests::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}
