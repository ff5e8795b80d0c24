use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, UpdateCartItemRequest},
    entity::{CartItems, Designs, cart_items, designs},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{
        design::{Cart, CartLine},
        resolve_file_url,
    },
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Copies the live design fields onto a cart row; returns whether anything changed.
fn refresh_snapshot(
    active: &mut cart_items::ActiveModel,
    item: &cart_items::Model,
    design: &designs::Model,
) -> bool {
    let image_url = resolve_file_url(design.image_id, design.image_url.clone());
    let mut changed = false;
    if item.item_name != design.item_name {
        active.item_name = Set(design.item_name.clone());
        changed = true;
    }
    if item.price != design.price {
        active.price = Set(design.price);
        changed = true;
    }
    if item.image_url != image_url {
        active.image_url = Set(image_url);
        changed = true;
    }
    if item.designer_id != design.designer_id {
        active.designer_id = Set(design.designer_id);
        changed = true;
    }
    if item.available_quantity != design.quantity {
        active.available_quantity = Set(design.quantity);
        changed = true;
    }
    changed
}

/// Loads the cart against live designs: rows whose design is gone are deleted and
/// stale snapshots are written back.
pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    let rows = CartItems::find()
        .find_also_related(Designs)
        .filter(cart_items::Column::UserId.eq(user.user_id))
        .order_by_desc(cart_items::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (item, design) in rows {
        let Some(design) = design else {
            tracing::debug!(cart_item = %item.id, "dropping cart line for deleted design");
            item.delete(&state.orm).await?;
            continue;
        };
        let mut active: cart_items::ActiveModel = item.clone().into();
        let item = if refresh_snapshot(&mut active, &item, &design) {
            active.update(&state.orm).await?
        } else {
            item
        };
        lines.push(CartLine::from(item));
    }

    Ok(ApiResponse::success(
        "OK",
        Cart::from_lines(lines),
        Some(Meta::empty()),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartLine>> {
    if payload.quantity <= 0 {
        return Err(AppError::bad_request("quantity must be greater than 0"));
    }
    let design = Designs::find_by_id(payload.design_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("Design not found"))?;
    if design.quantity <= 0 {
        return Err(AppError::bad_request("Design is out of stock"));
    }

    let existing = find_line(&state.orm, user.user_id, design.id).await?;
    let line = match existing {
        Some(item) => {
            let quantity = item
                .quantity
                .saturating_add(payload.quantity)
                .min(design.quantity);
            let mut active: cart_items::ActiveModel = item.clone().into();
            refresh_snapshot(&mut active, &item, &design);
            active.quantity = Set(quantity);
            active.update(&state.orm).await?
        }
        None => {
            cart_items::ActiveModel {
                user_id: Set(user.user_id),
                design_id: Set(design.id),
                quantity: Set(payload.quantity.min(design.quantity)),
                item_name: Set(design.item_name.clone()),
                price: Set(design.price),
                image_url: Set(resolve_file_url(design.image_id, design.image_url.clone())),
                designer_id: Set(design.designer_id),
                available_quantity: Set(design.quantity),
                ..Default::default()
            }
            .insert(&state.orm)
            .await?
        }
    };

    audit::record(
        &state.pool,
        user.user_id,
        "cart_update",
        "cart_items",
        serde_json::json!({ "design_id": design.id, "quantity": line.quantity }),
    )
    .await;
    Ok(ApiResponse::success("OK", line.into(), None))
}

pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    design_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartLine>> {
    if payload.quantity <= 0 {
        return Err(AppError::bad_request("quantity must be greater than 0"));
    }
    let item = find_line(&state.orm, user.user_id, design_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let design = Designs::find_by_id(design_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("Design not found"))?;
    if payload.quantity > design.quantity {
        return Err(AppError::BadRequest(format!(
            "Only {} items available",
            design.quantity
        )));
    }

    let mut active: cart_items::ActiveModel = item.clone().into();
    refresh_snapshot(&mut active, &item, &design);
    active.quantity = Set(payload.quantity);
    let line = active.update(&state.orm).await?;
    Ok(ApiResponse::success("Cart updated", line.into(), None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    design_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CartItems::delete_many()
        .filter(
            Condition::all()
                .add(cart_items::Column::UserId.eq(user.user_id))
                .add(cart_items::Column::DesignId.eq(design_id)),
        )
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.user_id,
        "cart_remove",
        "cart_items",
        serde_json::json!({ "design_id": design_id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CartItems::delete_many()
        .filter(cart_items::Column::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({ "removed": result.rows_affected }),
        Some(Meta::empty()),
    ))
}

/// Removes the given designs from a customer's cart, typically after they were ordered.
pub(crate) async fn remove_designs<C>(db: &C, user_id: Uuid, design_ids: &[Uuid]) -> AppResult<u64>
where
    C: ConnectionTrait,
{
    if design_ids.is_empty() {
        return Ok(0);
    }
    let result = CartItems::delete_many()
        .filter(
            Condition::all()
                .add(cart_items::Column::UserId.eq(user_id))
                .add(cart_items::Column::DesignId.is_in(design_ids.iter().copied())),
        )
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn find_line<C>(
    db: &C,
    user_id: Uuid,
    design_id: Uuid,
) -> AppResult<Option<cart_items::Model>>
where
    C: ConnectionTrait,
{
    let line = CartItems::find()
        .filter(
            Condition::all()
                .add(cart_items::Column::UserId.eq(user_id))
                .add(cart_items::Column::DesignId.eq(design_id)),
        )
        .one(db)
        .await?;
    Ok(line)
}
