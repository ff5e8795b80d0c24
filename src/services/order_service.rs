use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, LockType},
};
use uuid::Uuid;

use crate::{
    audit,
    domain::status::{
        DeliveryStatus, OrderStatus, PaymentMethod, PaymentStatus, parse_stored, transition_error,
    },
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    entity::{Designs, OrderItems, Orders, designs, order_items, orders},
    error::{AppError, AppResult},
    events::DesignAction,
    middleware::auth::{AuthUser, Role, ensure_admin, ensure_role},
    models::{
        design::Design,
        order::{Order, OrderWithItems, OrderWithItemsList},
        resolve_file_url,
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{
        cart_service,
        file_service::{Bucket, UploadedFile},
    },
    state::AppState,
};

pub const DEFAULT_DELIVERY_FEE: i64 = 500;

/// Outcome of putting an order's quantities back onto its designs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StockRestore {
    pub restored: Vec<Uuid>,
    pub failed: Vec<Uuid>,
}

/// Sums requested quantities per design; the map keeps designs in id order so row
/// locks are always taken in the same sequence.
fn merge_lines(payload: &CreateOrderRequest) -> AppResult<BTreeMap<Uuid, i32>> {
    if payload.items.is_empty() {
        return Err(AppError::bad_request("Order must contain at least one item"));
    }
    let mut merged = BTreeMap::new();
    for line in &payload.items {
        if line.quantity <= 0 {
            return Err(AppError::bad_request("Item quantity must be greater than 0"));
        }
        let total = merged.entry(line.design_id).or_insert(0i32);
        *total = total
            .checked_add(line.quantity)
            .ok_or_else(|| AppError::bad_request("Item quantity is too large"))?;
    }
    Ok(merged)
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_role(user, &[Role::Customer])?;
    let lines = merge_lines(&payload)?;
    let payment_method: PaymentMethod = payload.payment_method.parse()?;
    let delivery_fee = payload.delivery_fee.unwrap_or(DEFAULT_DELIVERY_FEE);
    if delivery_fee < 0 {
        return Err(AppError::bad_request("Delivery fee cannot be negative"));
    }
    if payload.delivery_address.trim().is_empty() || payload.contact_phone.trim().is_empty() {
        return Err(AppError::bad_request(
            "Delivery address and contact phone are required",
        ));
    }

    let txn = state.orm.begin().await?;

    let mut snapshots = Vec::with_capacity(lines.len());
    for (&design_id, &quantity) in &lines {
        let design = Designs::find_by_id(design_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Design {design_id} not found")))?;
        if design.quantity < quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {}: {} available",
                design.item_name, design.quantity
            )));
        }

        let updated = Designs::update_many()
            .col_expr(
                designs::Column::Quantity,
                Expr::col(designs::Column::Quantity).sub(quantity),
            )
            .filter(designs::Column::Id.eq(design_id))
            .filter(designs::Column::Quantity.gte(quantity))
            .exec(&txn)
            .await?;
        if updated.rows_affected != 1 {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {}",
                design.item_name
            )));
        }
        snapshots.push((design, quantity));
    }

    let items_total: i64 = snapshots
        .iter()
        .map(|(design, quantity)| design.price * i64::from(*quantity))
        .sum();

    let order = orders::ActiveModel {
        customer_id: Set(user.user_id),
        total_amount: Set(items_total + delivery_fee),
        delivery_fee: Set(delivery_fee),
        payment_method: Set(payment_method.to_string()),
        payment_status: Set(PaymentStatus::Pending.to_string()),
        status: Set(OrderStatus::Pending.to_string()),
        delivery_status: Set(DeliveryStatus::NotAssigned.to_string()),
        delivery_address: Set(payload.delivery_address.trim().to_string()),
        contact_phone: Set(payload.contact_phone.trim().to_string()),
        stock_deducted: Set(true),
        cash_collected: Set(false),
        payment_released: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(snapshots.len());
    for (design, quantity) in &snapshots {
        let item = order_items::ActiveModel {
            order_id: Set(order.id),
            design_id: Set(design.id),
            designer_id: Set(design.designer_id),
            item_code: Set(design.item_code.clone()),
            item_name: Set(design.item_name.clone()),
            image_url: Set(resolve_file_url(design.image_id, design.image_url.clone())),
            price: Set(design.price),
            quantity: Set(*quantity),
            subtotal: Set(design.price * i64::from(*quantity)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    let design_ids: Vec<Uuid> = lines.keys().copied().collect();
    cart_service::remove_designs(&txn, user.user_id, &design_ids).await?;

    txn.commit().await?;

    publish_stock_changes(state, &design_ids).await;
    audit::record(
        &state.pool,
        user.user_id,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "order_code": order.order_code }),
    )
    .await;
    tracing::info!(order_id = %order.id, order_code = %order.order_code, total = order.total_amount, "order created");

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems::new(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderWithItemsList>> {
    let condition = Condition::all().add(orders::Column::CustomerId.eq(user.user_id));
    list_with_items(state, condition, query).await
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderWithItemsList>> {
    ensure_role(user, &[Role::Financial, Role::Delivery])?;
    list_with_items(state, Condition::all(), query).await
}

/// Paged order listing with lines attached; `status` and `payment_status` narrow it.
pub(crate) async fn list_with_items(
    state: &AppState,
    mut condition: Condition,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderWithItemsList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: OrderStatus = status.parse()?;
        condition = condition.add(orders::Column::Status.eq(status.as_str()));
    }
    if let Some(payment) = query.payment_status.as_ref().filter(|s| !s.is_empty()) {
        let payment: PaymentStatus = payment.parse()?;
        condition = condition.add(orders::Column::PaymentStatus.eq(payment.as_str()));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(orders::Column::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(orders::Column::CreatedAt),
    };
    let total = finder.clone().count(&state.orm).await? as i64;
    let page_orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = attach_items(&state.orm, page_orders).await?;
    Ok(ApiResponse::success(
        "Ok",
        OrderWithItemsList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = find_order(&state.orm, id).await?;
    let items = load_items(&state.orm, order.id).await?;

    let allowed = order.customer_id == user.user_id
        || user.role.is_staff()
        || (user.is(Role::Designer) && items.iter().any(|i| i.designer_id == user.user_id));
    if !allowed {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems::new(order, items),
        Some(Meta::empty()),
    ))
}

/// Orders containing the designer's work, each trimmed to the designer's own lines.
pub async fn list_designer_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderWithItemsList>> {
    ensure_role(user, &[Role::Designer])?;
    let lines = OrderItems::find()
        .filter(order_items::Column::DesignerId.eq(user.user_id))
        .all(&state.orm)
        .await?;

    let mut by_order: HashMap<Uuid, Vec<order_items::Model>> = HashMap::new();
    for line in lines {
        by_order.entry(line.order_id).or_default().push(line);
    }
    let order_rows = Orders::find()
        .filter(orders::Column::Id.is_in(by_order.keys().copied()))
        .order_by_desc(orders::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let items: Vec<OrderWithItems> = order_rows
        .into_iter()
        .map(|order| {
            let lines = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems::new(order, lines)
        })
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        OrderWithItemsList { items },
        Some(meta),
    ))
}

/// Admin moves follow the order table; an order a driver has taken can no longer be
/// cancelled.
fn check_admin_transition(order: &orders::Model, next: OrderStatus) -> AppResult<OrderStatus> {
    let current: OrderStatus = parse_stored(&order.status)?;
    if !current.can_transition_to(next) {
        return Err(transition_error("order", current, next));
    }
    if next == OrderStatus::Cancelled
        && order.delivery_status != DeliveryStatus::NotAssigned.as_str()
    {
        return Err(AppError::bad_request(
            "Order is already out for delivery and cannot be cancelled",
        ));
    }
    Ok(current)
}

/// Cancels the order only while it is not cancelled and still matches `guard`.
/// Returns `false` when another request got there first, so stock is restored once.
async fn claim_cancellation<C>(
    db: &C,
    id: Uuid,
    guard: Condition,
    payment: Option<PaymentStatus>,
) -> AppResult<bool>
where
    C: ConnectionTrait,
{
    let mut update = Orders::update_many()
        .col_expr(
            orders::Column::Status,
            Expr::value(OrderStatus::Cancelled.as_str()),
        )
        .col_expr(orders::Column::StockDeducted, Expr::value(false))
        .col_expr(orders::Column::UpdatedAt, Expr::value(Utc::now()));
    if let Some(payment) = payment {
        update = update.col_expr(orders::Column::PaymentStatus, Expr::value(payment.as_str()));
    }
    let result = update
        .filter(orders::Column::Id.eq(id))
        .filter(orders::Column::Status.ne(OrderStatus::Cancelled.as_str()))
        .filter(guard)
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let next: OrderStatus = payload.status.parse()?;
    let order = find_order(&state.orm, id).await?;
    let current = check_admin_transition(&order, next)?;

    let order = if next == OrderStatus::Cancelled {
        let guard = Condition::all()
            .add(orders::Column::Status.eq(current.as_str()))
            .add(orders::Column::DeliveryStatus.eq(DeliveryStatus::NotAssigned.as_str()));
        if !claim_cancellation(&state.orm, order.id, guard, None).await? {
            return Err(AppError::bad_request("Order changed, reload and try again"));
        }
        if order.stock_deducted {
            restore_order_stock(state, &order).await?;
        }
        find_order(&state.orm, id).await?
    } else {
        let mut active: orders::ActiveModel = order.into();
        active.status = Set(next.to_string());
        if next == OrderStatus::Delivered {
            active.delivered_at = Set(Some(Utc::now().into()));
        }
        active.update(&state.orm).await?
    };

    audit::record(
        &state.pool,
        user.user_id,
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "from": current, "to": next }),
    )
    .await;
    tracing::info!(order_id = %order.id, from = %current, to = %next, "order status changed");
    Ok(ApiResponse::success("Order status updated", order.into(), None))
}

pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let order = find_order(&state.orm, id).await?;
    if order.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    let current: OrderStatus = parse_stored(&order.status)?;
    if current != OrderStatus::Pending {
        return Err(AppError::bad_request("Only pending orders can be cancelled"));
    }

    let guard = Condition::all().add(orders::Column::Status.eq(OrderStatus::Pending.as_str()));
    if !claim_cancellation(&state.orm, order.id, guard, None).await? {
        return Err(AppError::bad_request("Only pending orders can be cancelled"));
    }
    let restored = order.stock_deducted;
    if restored {
        restore_order_stock(state, &order).await?;
    }
    let order = find_order(&state.orm, id).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_cancel",
        "orders",
        serde_json::json!({ "order_id": order.id, "stock_restored": restored }),
    )
    .await;
    Ok(ApiResponse::success("Order cancelled", order.into(), None))
}

fn ensure_pending_bank_payment(order: &orders::Model) -> AppResult<()> {
    let method: PaymentMethod = parse_stored(&order.payment_method)?;
    if method != PaymentMethod::Bank {
        return Err(AppError::bad_request(
            "Only bank transfer payments need verification",
        ));
    }
    let payment: PaymentStatus = parse_stored(&order.payment_status)?;
    if payment != PaymentStatus::Pending {
        return Err(AppError::BadRequest(format!(
            "Payment is already {payment}"
        )));
    }
    Ok(())
}

pub async fn approve_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_role(user, &[Role::Financial])?;
    let order = find_order(&state.orm, id).await?;
    ensure_pending_bank_payment(&order)?;
    let status: OrderStatus = parse_stored(&order.status)?;

    let mut active: orders::ActiveModel = order.into();
    active.payment_status = Set(PaymentStatus::Paid.to_string());
    if status == OrderStatus::Pending {
        active.status = Set(OrderStatus::Confirmed.to_string());
    }
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_payment_approve",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;
    tracing::info!(order_id = %order.id, "bank payment approved");
    Ok(ApiResponse::success("Payment approved", order.into(), None))
}

/// Rejects a bank payment: the order is cancelled and its stock put back.
pub async fn deny_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_role(user, &[Role::Financial])?;
    let order = find_order(&state.orm, id).await?;
    ensure_pending_bank_payment(&order)?;

    let guard = Condition::all()
        .add(orders::Column::PaymentMethod.eq(PaymentMethod::Bank.as_str()))
        .add(orders::Column::PaymentStatus.eq(PaymentStatus::Pending.as_str()));
    if !claim_cancellation(&state.orm, order.id, guard, Some(PaymentStatus::Failed)).await? {
        return Err(AppError::bad_request("Payment is no longer pending"));
    }
    let restore = if order.stock_deducted {
        restore_order_stock(state, &order).await?
    } else {
        StockRestore::default()
    };
    let order = find_order(&state.orm, id).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_payment_deny",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "restored": restore.restored.len(),
            "failed": restore.failed,
        }),
    )
    .await;
    tracing::info!(order_id = %order.id, restored = restore.restored.len(), "bank payment denied");
    Ok(ApiResponse::success("Payment denied", order.into(), None))
}

/// Adds every line's quantity back to its design, one update per line. A line that
/// cannot be restored is logged and skipped, so restoration may be partial.
pub async fn restore_order_stock(
    state: &AppState,
    order: &orders::Model,
) -> AppResult<StockRestore> {
    let items = load_items(&state.orm, order.id).await?;
    let mut report = StockRestore::default();
    for item in items {
        let result = Designs::update_many()
            .col_expr(
                designs::Column::Quantity,
                Expr::col(designs::Column::Quantity).add(item.quantity),
            )
            .filter(designs::Column::Id.eq(item.design_id))
            .exec(&state.orm)
            .await;
        match result {
            Ok(res) if res.rows_affected == 1 => report.restored.push(item.design_id),
            Ok(_) => {
                tracing::warn!(order_id = %order.id, design_id = %item.design_id, "design missing, stock not restored");
                report.failed.push(item.design_id);
            }
            Err(err) => {
                tracing::warn!(order_id = %order.id, design_id = %item.design_id, error = %err, "stock restore failed");
                report.failed.push(item.design_id);
            }
        }
    }
    publish_stock_changes(state, &report.restored).await;
    Ok(report)
}

pub async fn upload_bank_slip(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    file: UploadedFile,
) -> AppResult<ApiResponse<Order>> {
    let order = find_order(&state.orm, id).await?;
    if order.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    ensure_slip_accepted(&order.payment_method, &order.payment_status)?;
    if order.status == OrderStatus::Cancelled.as_str() {
        return Err(AppError::bad_request(
            "Cannot upload a bank slip for a cancelled order",
        ));
    }

    let saved = state
        .files
        .save(&state.orm, Bucket::Uploads, file, Some(user.user_id))
        .await?;
    let mut active: orders::ActiveModel = order.into();
    active.bank_slip_id = Set(Some(saved.id));
    active.bank_slip_url = Set(Some(saved.url));
    active.payment_status = Set(PaymentStatus::Pending.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "order_bank_slip_upload",
        "orders",
        serde_json::json!({ "order_id": order.id, "file_id": saved.id }),
    )
    .await;
    Ok(ApiResponse::success("Bank slip uploaded", order.into(), None))
}

/// Slips are only taken for bank payments that are still open or were rejected.
pub(crate) fn ensure_slip_accepted(method: &str, payment_status: &str) -> AppResult<()> {
    let method: PaymentMethod = parse_stored(method)?;
    if method != PaymentMethod::Bank {
        return Err(AppError::bad_request(
            "Bank slips are only accepted for bank transfer payments",
        ));
    }
    let payment: PaymentStatus = parse_stored(payment_status)?;
    if payment == PaymentStatus::Paid {
        return Err(AppError::bad_request("Payment has already been approved"));
    }
    Ok(())
}

pub(crate) async fn find_order<C>(db: &C, id: Uuid) -> AppResult<orders::Model>
where
    C: ConnectionTrait,
{
    Orders::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}

pub(crate) async fn load_items<C>(db: &C, order_id: Uuid) -> AppResult<Vec<order_items::Model>>
where
    C: ConnectionTrait,
{
    let items = OrderItems::find()
        .filter(order_items::Column::OrderId.eq(order_id))
        .order_by_asc(order_items::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(items)
}

pub(crate) async fn attach_items<C>(
    db: &C,
    page_orders: Vec<orders::Model>,
) -> AppResult<Vec<OrderWithItems>>
where
    C: ConnectionTrait,
{
    let ids: Vec<Uuid> = page_orders.iter().map(|o| o.id).collect();
    let mut by_order: HashMap<Uuid, Vec<order_items::Model>> = HashMap::new();
    if !ids.is_empty() {
        for item in OrderItems::find()
            .filter(order_items::Column::OrderId.is_in(ids))
            .all(db)
            .await?
        {
            by_order.entry(item.order_id).or_default().push(item);
        }
    }
    Ok(page_orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems::new(order, items)
        })
        .collect())
}

/// Broadcasts the current state of designs whose quantity changed.
async fn publish_stock_changes(state: &AppState, design_ids: &[Uuid]) {
    if design_ids.is_empty() {
        return;
    }
    match Designs::find()
        .filter(designs::Column::Id.is_in(design_ids.iter().copied()))
        .all(&state.orm)
        .await
    {
        Ok(rows) => {
            for row in rows {
                let design = Design::from(row);
                state
                    .events
                    .publish_design(DesignAction::Stock, design.id, Some(design));
            }
        }
        Err(err) => tracing::warn!(error = %err, "could not load designs for stock events"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::orders::OrderLineRequest;

    fn request(lines: &[(Uuid, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            items: lines
                .iter()
                .map(|&(design_id, quantity)| OrderLineRequest {
                    design_id,
                    quantity,
                })
                .collect(),
            delivery_address: "12 Temple Road".into(),
            contact_phone: "0771234567".into(),
            payment_method: "cash".into(),
            delivery_fee: None,
        }
    }

    #[test]
    fn duplicate_lines_are_merged() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let merged = merge_lines(&request(&[(a, 1), (b, 2), (a, 3)])).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&a], 4);
        assert_eq!(merged[&b], 2);
    }

    #[test]
    fn empty_or_non_positive_lines_are_rejected() {
        assert!(merge_lines(&request(&[])).is_err());
        assert!(merge_lines(&request(&[(Uuid::new_v4(), 0)])).is_err());
    }

    #[test]
    fn merged_quantities_that_overflow_are_rejected() {
        let a = Uuid::new_v4();
        let err = merge_lines(&request(&[(a, i32::MAX), (a, 1)])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(merge_lines(&request(&[(a, i32::MAX)])).unwrap()[&a], i32::MAX);
    }

    fn order(status: &str, delivery_status: &str) -> orders::Model {
        let now = Utc::now().into();
        orders::Model {
            id: Uuid::new_v4(),
            order_code: "WA-2026-0101-ABC".into(),
            customer_id: Uuid::new_v4(),
            total_amount: 5_500,
            delivery_fee: 500,
            payment_method: "cash".into(),
            payment_status: "pending".into(),
            status: status.into(),
            delivery_status: delivery_status.into(),
            delivery_address: "Kandy".into(),
            contact_phone: "0770000000".into(),
            bank_slip_id: None,
            bank_slip_url: None,
            stock_deducted: true,
            driver_id: None,
            cash_collected: false,
            payment_released: false,
            release_transaction_id: None,
            released_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn admin_cannot_cancel_once_a_driver_has_the_order() {
        let waiting = order("ready_for_delivery", "not_assigned");
        assert!(check_admin_transition(&waiting, OrderStatus::Cancelled).is_ok());
        let assigned = order("ready_for_delivery", "assigned");
        assert!(check_admin_transition(&assigned, OrderStatus::Cancelled).is_err());
        assert!(check_admin_transition(&assigned, OrderStatus::Delivered).is_ok());
        let delivered = order("delivered", "delivered");
        assert!(check_admin_transition(&delivered, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn slips_only_for_open_bank_payments() {
        assert!(ensure_slip_accepted("bank", "pending").is_ok());
        assert!(ensure_slip_accepted("bank", "failed").is_ok());
        assert!(ensure_slip_accepted("bank", "paid").is_err());
        assert!(ensure_slip_accepted("cash", "pending").is_err());
    }
}
