use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::stock::Combination,
    dto::design::{DesignForm, DesignPatch},
    entity::{Designs, designs},
    error::{AppError, AppResult},
    events::DesignAction,
    middleware::auth::{AuthUser, Role, ensure_role},
    models::design::{Design, DesignList},
    response::{ApiResponse, Meta},
    routes::params::{DesignQuery, SortOrder},
    services::file_service::{Bucket, UploadedFile},
    state::AppState,
};

fn validate_amounts(price: i64, quantity: i32) -> AppResult<()> {
    if price <= 0 {
        return Err(AppError::bad_request("Price must be greater than 0"));
    }
    if quantity < 0 {
        return Err(AppError::bad_request("Quantity cannot be negative"));
    }
    Ok(())
}

pub async fn create_design(
    state: &AppState,
    user: &AuthUser,
    form: DesignForm,
    image: Option<UploadedFile>,
) -> AppResult<ApiResponse<Design>> {
    ensure_role(user, &[Role::Designer])?;
    validate_amounts(form.price, form.quantity)?;
    let combo =
        Combination::new(&form.material, &form.board_size, &form.thickness, &form.color)
            .normalized()?;
    let image = image.ok_or_else(|| AppError::bad_request("Design image is required"))?;
    let txn = state.orm.begin().await?;
    let saved = state
        .files
        .save(&txn, Bucket::Images, image, Some(user.user_id))
        .await?;

    let model = designs::ActiveModel {
        designer_id: Set(user.user_id),
        item_name: Set(form.item_name),
        description: Set(form.description),
        price: Set(form.price),
        quantity: Set(form.quantity),
        material: Set(combo.material),
        board_size: Set(combo.board_size),
        thickness: Set(combo.thickness),
        color: Set(combo.color),
        image_id: Set(Some(saved.id)),
        image_url: Set(Some(saved.url)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    let design = Design::from(model);
    state
        .events
        .publish_design(DesignAction::Created, design.id, Some(design.clone()));
    audit::record(
        &state.pool,
        user.user_id,
        "design_create",
        "designs",
        serde_json::json!({ "design_id": design.id, "item_code": design.item_code }),
    )
    .await;
    tracing::info!(design_id = %design.id, item_code = %design.item_code, "design created");

    Ok(ApiResponse::success("Design created", design, None))
}

pub async fn list_designs(
    state: &AppState,
    query: DesignQuery,
) -> AppResult<ApiResponse<DesignList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(q) = query.q.as_ref().map(|q| q.trim()).filter(|q| !q.is_empty()) {
        let pattern = format!("%{q}%");
        condition = condition.add(
            Condition::any()
                .add(designs::Column::ItemName.like(pattern.clone()))
                .add(designs::Column::ItemCode.like(pattern)),
        );
    }
    if let Some(material) = query.material.as_ref().filter(|m| !m.is_empty()) {
        condition = condition.add(designs::Column::Material.eq(material.to_lowercase()));
    }
    if let Some(designer_id) = query.designer_id {
        condition = condition.add(designs::Column::DesignerId.eq(designer_id));
    }
    if query.in_stock == Some(true) {
        condition = condition.add(designs::Column::Quantity.gt(0));
    }

    let mut finder = Designs::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(designs::Column::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(designs::Column::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Design::from)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        DesignList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_design(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Design>> {
    let design = find_design(state, id).await?;
    Ok(ApiResponse::success(
        "OK",
        design.into(),
        Some(Meta::empty()),
    ))
}

pub async fn my_designs(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DesignList>> {
    ensure_role(user, &[Role::Designer])?;
    let items: Vec<Design> = Designs::find()
        .filter(designs::Column::DesignerId.eq(user.user_id))
        .order_by_desc(designs::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Design::from)
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        DesignList { items },
        Some(meta),
    ))
}

pub async fn update_design(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: DesignPatch,
    image: Option<UploadedFile>,
) -> AppResult<ApiResponse<Design>> {
    let existing = find_design(state, id).await?;
    if existing.designer_id != user.user_id && !user.is(Role::Admin) {
        return Err(AppError::Forbidden);
    }

    let price = patch.price.unwrap_or(existing.price);
    let quantity = patch.quantity.unwrap_or(existing.quantity);
    validate_amounts(price, quantity)?;
    let combo = Combination::new(
        patch.material.as_deref().unwrap_or(&existing.material),
        patch.board_size.as_deref().unwrap_or(&existing.board_size),
        patch.thickness.as_deref().unwrap_or(&existing.thickness),
        patch.color.as_deref().unwrap_or(&existing.color),
    )
    .normalized()?;

    let txn = state.orm.begin().await?;
    let saved = match image {
        Some(file) => Some(
            state
                .files
                .save(&txn, Bucket::Images, file, Some(user.user_id))
                .await?,
        ),
        None => None,
    };

    let mut active: designs::ActiveModel = existing.into();
    if let Some(name) = patch.item_name.map(|n| n.trim().to_string()) {
        if name.is_empty() {
            return Err(AppError::bad_request("item_name cannot be empty"));
        }
        active.item_name = Set(name);
    }
    if let Some(description) = patch.description {
        active.description = Set(Some(description).filter(|d| !d.trim().is_empty()));
    }
    active.price = Set(price);
    active.quantity = Set(quantity);
    active.material = Set(combo.material);
    active.board_size = Set(combo.board_size);
    active.thickness = Set(combo.thickness);
    active.color = Set(combo.color);
    if let Some(saved) = saved {
        active.image_id = Set(Some(saved.id));
        active.image_url = Set(Some(saved.url));
    }
    let design = Design::from(active.update(&txn).await?);
    txn.commit().await?;

    state
        .events
        .publish_design(DesignAction::Updated, design.id, Some(design.clone()));
    audit::record(
        &state.pool,
        user.user_id,
        "design_update",
        "designs",
        serde_json::json!({ "design_id": design.id }),
    )
    .await;
    Ok(ApiResponse::success("Design updated", design, None))
}

pub async fn delete_design(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = find_design(state, id).await?;
    if existing.designer_id != user.user_id && !user.is(Role::Admin) {
        return Err(AppError::Forbidden);
    }
    existing.delete(&state.orm).await?;

    state.events.publish_design(DesignAction::Deleted, id, None);
    audit::record(
        &state.pool,
        user.user_id,
        "design_delete",
        "designs",
        serde_json::json!({ "design_id": id }),
    )
    .await;
    tracing::info!(design_id = %id, "design deleted");
    Ok(ApiResponse::success(
        "Design deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

async fn find_design(state: &AppState, id: Uuid) -> AppResult<designs::Model> {
    Designs::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_checked() {
        assert!(validate_amounts(100, 0).is_ok());
        assert!(validate_amounts(0, 1).is_err());
        assert!(validate_amounts(100, -1).is_err());
    }
}
