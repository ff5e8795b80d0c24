use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    audit,
    domain::status::{OrderStatus, PaymentStatus},
    dto::finance::ReleaseDesignerPaymentRequest,
    entity::{DesignerPayments, OrderItems, designer_payments, order_items, orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::finance::{
        DesignerEarnings, DesignerPayment, DesignerPaymentList, PendingDesignerPayment,
        PendingDesignerPaymentList,
    },
    response::{ApiResponse, Meta},
    routes::params::DesignerPaymentQuery,
    services::order_service::find_order,
    state::AppState,
};

const ALREADY_RELEASED: &str = "Payment already released for this item";

/// Only paid orders that were not cancelled afterwards earn a payout.
fn ensure_payable(order: &orders::Model) -> AppResult<()> {
    if order.status == OrderStatus::Cancelled.as_str() {
        return Err(AppError::bad_request(
            "Designer payments cannot be released for a cancelled order",
        ));
    }
    if order.payment_status != PaymentStatus::Paid.as_str() {
        return Err(AppError::bad_request(
            "Order must be paid before designer payments are released",
        ));
    }
    Ok(())
}

/// Pays a designer for one line of a paid order, keeping the platform commission.
/// Each line can be paid at most once.
pub async fn release_designer_payment(
    state: &AppState,
    user: &AuthUser,
    payload: ReleaseDesignerPaymentRequest,
) -> AppResult<ApiResponse<DesignerPayment>> {
    ensure_role(user, &[Role::Financial])?;
    let order = find_order(&state.orm, payload.order_id).await?;
    ensure_payable(&order)?;

    let mut condition = Condition::all().add(order_items::Column::OrderId.eq(order.id));
    condition = match (payload.order_item_id, payload.design_id) {
        (Some(item_id), _) => condition.add(order_items::Column::Id.eq(item_id)),
        (None, Some(design_id)) => condition.add(order_items::Column::DesignId.eq(design_id)),
        (None, None) => {
            return Err(AppError::bad_request(
                "order_item_id or design_id is required",
            ));
        }
    };
    let mut matches = OrderItems::find().filter(condition).all(&state.orm).await?;
    let item = match matches.len() {
        0 => return Err(AppError::bad_request("Item not found in this order")),
        1 => matches.remove(0),
        _ => {
            return Err(AppError::bad_request(
                "Several lines match, pass order_item_id",
            ));
        }
    };

    let existing = DesignerPayments::find()
        .filter(designer_payments::Column::OrderId.eq(order.id))
        .filter(designer_payments::Column::OrderItemId.eq(item.id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(ALREADY_RELEASED.into()));
    }

    // Two concurrent releases can both pass the check above; the unique
    // constraint then rejects the second insert.
    let payment = designer_payments::ActiveModel {
        order_id: Set(order.id),
        order_item_id: Set(item.id),
        designer_id: Set(item.designer_id),
        design_id: Set(item.design_id),
        subtotal: Set(item.subtotal),
        released_by: Set(user.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Duplicate(_) => AppError::Duplicate(ALREADY_RELEASED.into()),
        other => other,
    })?;

    audit::record(
        &state.pool,
        user.user_id,
        "designer_payment_release",
        "designer_payments",
        serde_json::json!({
            "payment_id": payment.id,
            "order_id": payment.order_id,
            "order_item_id": payment.order_item_id,
            "designer_amount": payment.designer_amount,
        }),
    )
    .await;
    tracing::info!(
        order_id = %payment.order_id,
        order_item_id = %payment.order_item_id,
        commission = payment.commission,
        designer_amount = payment.designer_amount,
        "designer payment released"
    );
    Ok(ApiResponse::success(
        "Designer payment released",
        payment.into(),
        None,
    ))
}

pub async fn list_designer_payments(
    state: &AppState,
    user: &AuthUser,
    query: DesignerPaymentQuery,
) -> AppResult<ApiResponse<DesignerPaymentList>> {
    ensure_role(user, &[Role::Financial])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = DesignerPayments::find();
    if let Some(designer_id) = query.designer_id {
        finder = finder.filter(designer_payments::Column::DesignerId.eq(designer_id));
    }
    let finder = finder.order_by_desc(designer_payments::Column::ReleasedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(DesignerPayment::from)
        .collect();
    Ok(ApiResponse::success(
        "Ok",
        DesignerPaymentList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn my_designer_payments(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DesignerEarnings>> {
    ensure_role(user, &[Role::Designer])?;
    let items: Vec<DesignerPayment> = DesignerPayments::find()
        .filter(designer_payments::Column::DesignerId.eq(user.user_id))
        .order_by_desc(designer_payments::Column::ReleasedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(DesignerPayment::from)
        .collect();
    let earnings = DesignerEarnings {
        total_subtotal: items.iter().map(|p| p.subtotal).sum(),
        total_commission: items.iter().map(|p| p.commission).sum(),
        total_received: items.iter().map(|p| p.designer_amount).sum(),
        items,
    };
    Ok(ApiResponse::success("Ok", earnings, Some(Meta::empty())))
}

/// Lines of paid, uncancelled orders that have not been paid out yet.
pub async fn list_pending_designer_payments(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PendingDesignerPaymentList>> {
    ensure_role(user, &[Role::Financial])?;
    let items = sqlx::query_as::<_, PendingDesignerPayment>(
        r#"
        SELECT o.id AS order_id, o.order_code, oi.id AS order_item_id, oi.design_id,
               oi.designer_id, oi.item_name, oi.subtotal
        FROM order_items oi
        JOIN orders o ON o.id = oi.order_id
        LEFT JOIN designer_payments dp
               ON dp.order_id = oi.order_id AND dp.order_item_id = oi.id
        WHERE o.payment_status = 'paid' AND o.status <> 'cancelled' AND dp.id IS NULL
        ORDER BY o.created_at ASC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        PendingDesignerPaymentList { items },
        Some(meta),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn order(status: &str, payment_status: &str) -> orders::Model {
        let now = Utc::now().into();
        orders::Model {
            id: Uuid::new_v4(),
            order_code: "WA-2026-0101-ABC".into(),
            customer_id: Uuid::new_v4(),
            total_amount: 10_500,
            delivery_fee: 500,
            payment_method: "bank".into(),
            payment_status: payment_status.into(),
            status: status.into(),
            delivery_status: "not_assigned".into(),
            delivery_address: "Galle".into(),
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
    fn payouts_need_a_paid_live_order() {
        assert!(ensure_payable(&order("confirmed", "paid")).is_ok());
        assert!(ensure_payable(&order("confirmed", "pending")).is_err());
        assert!(ensure_payable(&order("cancelled", "paid")).is_err());
    }
}
