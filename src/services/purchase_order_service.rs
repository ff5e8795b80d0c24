use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::status::{
        PurchaseOrderStatus, PurchasePaymentStatus, SupplierStatus, parse_stored, transition_error,
    },
    dto::inventory::CreatePurchaseOrderRequest,
    entity::{PurchaseOrders, purchase_orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::inventory::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderList},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::{stock_service, supplier_service::find_supplier},
    state::AppState,
};

/// Normalizes every line and returns them with the order total.
fn validate_lines(lines: Vec<PurchaseOrderLine>) -> AppResult<(Vec<PurchaseOrderLine>, i64)> {
    if lines.is_empty() {
        return Err(AppError::bad_request(
            "Purchase order must contain at least one item",
        ));
    }
    let mut normalized = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(AppError::bad_request("Item quantity must be greater than 0"));
        }
        if line.unit_price < 0 {
            return Err(AppError::bad_request("Unit price cannot be negative"));
        }
        let combo = line.combination().normalized()?;
        normalized.push(PurchaseOrderLine {
            material: combo.material,
            board_size: combo.board_size,
            thickness: combo.thickness,
            color: combo.color,
            quantity: line.quantity,
            unit_price: line.unit_price,
        });
    }
    let total = normalized
        .iter()
        .try_fold(0i64, |acc, line| acc.checked_add(line.line_total()?))
        .ok_or_else(|| AppError::bad_request("Purchase order total is too large"))?;
    Ok((normalized, total))
}

pub async fn create_purchase_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePurchaseOrderRequest,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    ensure_role(user, &[Role::Inventory])?;
    let supplier = find_supplier(state, payload.supplier_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound => AppError::bad_request("Supplier not found"),
            other => other,
        })?;
    if supplier.status != SupplierStatus::Active.as_str() {
        return Err(AppError::bad_request("Supplier is not active"));
    }
    let (lines, total) = validate_lines(payload.items)?;
    let items = serde_json::to_value(&lines)
        .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;

    let model = purchase_orders::ActiveModel {
        supplier_id: Set(supplier.id),
        items: Set(items),
        total_amount: Set(total),
        status: Set(PurchaseOrderStatus::Pending.to_string()),
        payment_status: Set(PurchasePaymentStatus::Unpaid.to_string()),
        expected_date: Set(payload.expected_date),
        notes: Set(payload.notes),
        created_by: Set(user.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "purchase_order_create",
        "purchase_orders",
        serde_json::json!({
            "purchase_order_id": model.id,
            "po_number": model.po_number,
            "total": total,
        }),
    )
    .await;
    tracing::info!(po_number = %model.po_number, total, "purchase order created");
    Ok(ApiResponse::success(
        "Purchase order created",
        PurchaseOrder::from_model(model)?,
        None,
    ))
}

pub async fn list_purchase_orders(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<PurchaseOrderList>> {
    ensure_role(user, &[Role::Inventory, Role::Financial])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = PurchaseOrders::find();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: PurchaseOrderStatus = status.parse()?;
        finder = finder.filter(purchase_orders::Column::Status.eq(status.as_str()));
    }
    let finder = finder.order_by_desc(purchase_orders::Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(PurchaseOrder::from_model)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(ApiResponse::success(
        "Ok",
        PurchaseOrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_purchase_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    ensure_role(user, &[Role::Inventory, Role::Financial])?;
    let model = PurchaseOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        PurchaseOrder::from_model(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn approve_purchase_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    move_to(state, user, id, PurchaseOrderStatus::Approved).await
}

pub async fn cancel_purchase_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    move_to(state, user, id, PurchaseOrderStatus::Cancelled).await
}

/// Marks the goods as delivered and adds every line to stock, all in one transaction.
/// The row lock makes a second concurrent receipt see `received` and fail.
pub async fn receive_purchase_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    ensure_role(user, &[Role::Inventory])?;
    let txn = state.orm.begin().await?;
    let model = PurchaseOrders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let current: PurchaseOrderStatus = parse_stored(&model.status)?;
    if !current.can_transition_to(PurchaseOrderStatus::Received) {
        return Err(transition_error(
            "purchase order",
            current,
            PurchaseOrderStatus::Received,
        ));
    }

    let lines = PurchaseOrder::lines(&model)?;
    stock_service::receive_lines(&txn, &lines).await?;

    let mut active: purchase_orders::ActiveModel = model.into();
    active.status = Set(PurchaseOrderStatus::Received.to_string());
    active.received_at = Set(Some(Utc::now().into()));
    let model = active.update(&txn).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "purchase_order_receive",
        "purchase_orders",
        serde_json::json!({ "purchase_order_id": model.id, "lines": lines.len() }),
    )
    .await;
    tracing::info!(po_number = %model.po_number, lines = lines.len(), "purchase order received");
    Ok(ApiResponse::success(
        "Purchase order received",
        PurchaseOrder::from_model(model)?,
        None,
    ))
}

async fn move_to(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    next: PurchaseOrderStatus,
) -> AppResult<ApiResponse<PurchaseOrder>> {
    ensure_role(user, &[Role::Inventory])?;
    let model = PurchaseOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let current: PurchaseOrderStatus = parse_stored(&model.status)?;
    if !current.can_transition_to(next) {
        return Err(transition_error("purchase order", current, next));
    }
    let mut active: purchase_orders::ActiveModel = model.into();
    active.status = Set(next.to_string());
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "purchase_order_status_update",
        "purchase_orders",
        serde_json::json!({ "purchase_order_id": model.id, "from": current, "to": next }),
    )
    .await;
    Ok(ApiResponse::success(
        "Purchase order updated",
        PurchaseOrder::from_model(model)?,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(material: &str, quantity: i32, unit_price: i64) -> PurchaseOrderLine {
        PurchaseOrderLine {
            material: material.into(),
            board_size: "12x12".into(),
            thickness: "6MM".into(),
            color: "dark".into(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn totals_and_normalizes_lines() {
        let (lines, total) =
            validate_lines(vec![line("Teak", 10, 1500), line("pine", 4, 800)]).unwrap();
        assert_eq!(total, 10 * 1500 + 4 * 800);
        assert_eq!(lines[0].material, "teak");
        assert_eq!(lines[0].thickness, "6mm");
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(validate_lines(vec![]).is_err());
        assert!(validate_lines(vec![line("teak", 0, 100)]).is_err());
        assert!(validate_lines(vec![line("bamboo", 1, 100)]).is_err());
    }

    #[test]
    fn totals_that_overflow_are_rejected() {
        assert!(validate_lines(vec![line("teak", i32::MAX, i64::MAX)]).is_err());
        assert!(validate_lines(vec![line("teak", 1, i64::MAX), line("pine", 1, 1)]).is_err());
    }
}
