//! Courier workflow shared by marketplace and custom orders.
//!
//! Every operation loads the order as a [`DeliveryJob`], checks the request against it
//! with the pure `check_*` functions, then writes a [`DeliveryChange`] back to the
//! table the job came from.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::status::{
        CustomOrderStatus, DeliveryStatus, OrderStatus, PaymentMethod, PaymentStatus,
        parse_stored, transition_error,
    },
    dto::delivery::{
        AssignDeliveryRequest, ReleaseDeliveryPaymentRequest, UpdateDeliveryStatusRequest,
    },
    entity::{CustomOrders, Orders, Users, custom_orders, orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::delivery::{DeliveryJob, DeliveryJobList, DeliveryKind},
    response::{ApiResponse, Meta},
    routes::params::DeliveryQueueQuery,
    services::{custom_order_service::find_custom_order, order_service::find_order},
    state::AppState,
};

#[derive(Debug, Default)]
struct DeliveryChange {
    driver_id: Option<Uuid>,
    delivery_status: Option<DeliveryStatus>,
    delivered: bool,
    cash_collected: bool,
    payment_paid: bool,
    release_transaction_id: Option<String>,
}

fn check_assign(job: &DeliveryJob) -> AppResult<()> {
    let ready = match job.kind {
        DeliveryKind::Orders => job.status == OrderStatus::ReadyForDelivery.as_str(),
        DeliveryKind::CustomOrders => job.status == CustomOrderStatus::Completed.as_str(),
    };
    if !ready {
        return Err(AppError::bad_request("Order is not ready for delivery"));
    }
    let current: DeliveryStatus = parse_stored(&job.delivery_status)?;
    if !current.can_transition_to(DeliveryStatus::Assigned) {
        return Err(transition_error(
            "delivery",
            current,
            DeliveryStatus::Assigned,
        ));
    }
    Ok(())
}

/// Marketplace and custom orders share the `cancelled` status value.
fn check_not_cancelled(job: &DeliveryJob) -> AppResult<()> {
    if job.status == OrderStatus::Cancelled.as_str() {
        return Err(AppError::bad_request("Order has been cancelled"));
    }
    Ok(())
}

fn check_driver(job: &DeliveryJob, user: &AuthUser) -> AppResult<()> {
    if user.is(Role::Admin) || job.driver_id == Some(user.user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn check_status_change(job: &DeliveryJob, next: DeliveryStatus) -> AppResult<()> {
    check_not_cancelled(job)?;
    let current: DeliveryStatus = parse_stored(&job.delivery_status)?;
    if current == DeliveryStatus::NotAssigned || next == DeliveryStatus::Assigned {
        return Err(AppError::bad_request(
            "Use the assign endpoint to assign a driver",
        ));
    }
    if !current.can_transition_to(next) {
        return Err(transition_error("delivery", current, next));
    }
    Ok(())
}

fn check_cash_collection(job: &DeliveryJob) -> AppResult<()> {
    check_not_cancelled(job)?;
    let method: PaymentMethod = parse_stored(&job.payment_method)?;
    if method != PaymentMethod::Cash {
        return Err(AppError::bad_request(
            "Cash can only be collected for cash on delivery orders",
        ));
    }
    if job.cash_collected {
        return Err(AppError::bad_request("Cash already collected"));
    }
    Ok(())
}

fn check_release(job: &DeliveryJob, transaction_id: &str) -> AppResult<()> {
    if transaction_id.trim().is_empty() {
        return Err(AppError::bad_request("transaction_id is required"));
    }
    if job.payment_released {
        return Err(AppError::bad_request("Delivery payment already released"));
    }
    if !job.cash_collected && job.payment_status != PaymentStatus::Paid.as_str() {
        return Err(AppError::bad_request(
            "Payment has not been collected for this order",
        ));
    }
    Ok(())
}

async fn load_job(state: &AppState, kind: DeliveryKind, id: Uuid) -> AppResult<DeliveryJob> {
    Ok(match kind {
        DeliveryKind::Orders => find_order(&state.orm, id).await?.into(),
        DeliveryKind::CustomOrders => find_custom_order(&state.orm, id).await?.into(),
    })
}

async fn apply(
    state: &AppState,
    kind: DeliveryKind,
    id: Uuid,
    change: DeliveryChange,
) -> AppResult<DeliveryJob> {
    let now = Utc::now();
    match kind {
        DeliveryKind::Orders => {
            let mut active: orders::ActiveModel = find_order(&state.orm, id).await?.into();
            if let Some(driver) = change.driver_id {
                active.driver_id = Set(Some(driver));
            }
            if let Some(status) = change.delivery_status {
                active.delivery_status = Set(status.to_string());
            }
            if change.delivered {
                active.delivered_at = Set(Some(now.into()));
                active.status = Set(OrderStatus::Delivered.to_string());
            }
            if change.cash_collected {
                active.cash_collected = Set(true);
            }
            if change.payment_paid {
                active.payment_status = Set(PaymentStatus::Paid.to_string());
            }
            if let Some(txn_id) = change.release_transaction_id {
                active.payment_released = Set(true);
                active.release_transaction_id = Set(Some(txn_id));
                active.released_at = Set(Some(now.into()));
            }
            Ok(active.update(&state.orm).await?.into())
        }
        DeliveryKind::CustomOrders => {
            let mut active: custom_orders::ActiveModel =
                find_custom_order(&state.orm, id).await?.into();
            if let Some(driver) = change.driver_id {
                active.driver_id = Set(Some(driver));
            }
            if let Some(status) = change.delivery_status {
                active.delivery_status = Set(status.to_string());
            }
            if change.delivered {
                active.delivered_at = Set(Some(now.into()));
            }
            if change.cash_collected {
                active.cash_collected = Set(true);
            }
            if let Some(txn_id) = change.release_transaction_id {
                active.payment_released = Set(true);
                active.release_transaction_id = Set(Some(txn_id));
                active.released_at = Set(Some(now.into()));
            }
            Ok(active.update(&state.orm).await?.into())
        }
    }
}

pub async fn list_delivery_queue(
    state: &AppState,
    user: &AuthUser,
    query: DeliveryQueueQuery,
) -> AppResult<ApiResponse<DeliveryJobList>> {
    ensure_role(user, &[Role::Delivery])?;
    let mine = query.mine.unwrap_or(false);
    let active_states = [
        DeliveryStatus::Assigned.as_str(),
        DeliveryStatus::PickedUp.as_str(),
        DeliveryStatus::InTransit.as_str(),
    ];

    let mut order_filter = Condition::any()
        .add(orders::Column::Status.eq(OrderStatus::ReadyForDelivery.as_str()))
        .add(orders::Column::DeliveryStatus.is_in(active_states));
    if mine {
        order_filter = Condition::all()
            .add(order_filter)
            .add(orders::Column::DriverId.eq(user.user_id));
    }
    let order_jobs = Orders::find()
        .filter(order_filter)
        .filter(orders::Column::Status.ne(OrderStatus::Cancelled.as_str()))
        .order_by_asc(orders::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut custom_filter = Condition::all()
        .add(custom_orders::Column::Status.eq(CustomOrderStatus::Completed.as_str()))
        .add(custom_orders::Column::DeliveryStatus.ne(DeliveryStatus::Delivered.as_str()));
    if mine {
        custom_filter = custom_filter.add(custom_orders::Column::DriverId.eq(user.user_id));
    }
    let custom_jobs = CustomOrders::find()
        .filter(custom_filter)
        .order_by_asc(custom_orders::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let items: Vec<DeliveryJob> = order_jobs
        .into_iter()
        .map(DeliveryJob::from)
        .chain(custom_jobs.into_iter().map(DeliveryJob::from))
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        DeliveryJobList { items },
        Some(meta),
    ))
}

pub async fn assign_delivery(
    state: &AppState,
    user: &AuthUser,
    kind: DeliveryKind,
    id: Uuid,
    payload: AssignDeliveryRequest,
) -> AppResult<ApiResponse<DeliveryJob>> {
    ensure_role(user, &[Role::Delivery])?;
    let driver_id = payload.driver_id.unwrap_or(user.user_id);
    if driver_id != user.user_id {
        let driver = Users::find_by_id(driver_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::bad_request("Driver not found"))?;
        if driver.role != Role::Delivery.as_str() {
            return Err(AppError::bad_request("Assigned user is not a delivery driver"));
        }
    }

    let job = load_job(state, kind, id).await?;
    check_assign(&job)?;
    let job = apply(
        state,
        kind,
        id,
        DeliveryChange {
            driver_id: Some(driver_id),
            delivery_status: Some(DeliveryStatus::Assigned),
            ..Default::default()
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "delivery_assign",
        "deliveries",
        serde_json::json!({ "kind": kind, "order_id": id, "driver_id": driver_id }),
    )
    .await;
    tracing::info!(order_id = %id, %driver_id, "delivery assigned");
    Ok(ApiResponse::success("Delivery assigned", job, None))
}

pub async fn update_delivery_status(
    state: &AppState,
    user: &AuthUser,
    kind: DeliveryKind,
    id: Uuid,
    payload: UpdateDeliveryStatusRequest,
) -> AppResult<ApiResponse<DeliveryJob>> {
    ensure_role(user, &[Role::Delivery])?;
    let next: DeliveryStatus = payload.delivery_status.parse()?;
    let job = load_job(state, kind, id).await?;
    check_driver(&job, user)?;
    check_status_change(&job, next)?;

    let from = job.delivery_status.clone();
    let job = apply(
        state,
        kind,
        id,
        DeliveryChange {
            delivery_status: Some(next),
            delivered: next == DeliveryStatus::Delivered,
            ..Default::default()
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "delivery_status_update",
        "deliveries",
        serde_json::json!({ "kind": kind, "order_id": id, "from": from, "to": next }),
    )
    .await;
    Ok(ApiResponse::success("Delivery status updated", job, None))
}

pub async fn collect_cash(
    state: &AppState,
    user: &AuthUser,
    kind: DeliveryKind,
    id: Uuid,
) -> AppResult<ApiResponse<DeliveryJob>> {
    ensure_role(user, &[Role::Delivery])?;
    let job = load_job(state, kind, id).await?;
    check_driver(&job, user)?;
    check_cash_collection(&job)?;

    let job = apply(
        state,
        kind,
        id,
        DeliveryChange {
            cash_collected: true,
            payment_paid: kind == DeliveryKind::Orders,
            ..Default::default()
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "delivery_cash_collect",
        "deliveries",
        serde_json::json!({ "kind": kind, "order_id": id, "amount": job.total_amount }),
    )
    .await;
    Ok(ApiResponse::success("Cash collected", job, None))
}

pub async fn release_delivery_payment(
    state: &AppState,
    user: &AuthUser,
    kind: DeliveryKind,
    id: Uuid,
    payload: ReleaseDeliveryPaymentRequest,
) -> AppResult<ApiResponse<DeliveryJob>> {
    ensure_role(user, &[Role::Financial])?;
    let job = load_job(state, kind, id).await?;
    check_release(&job, &payload.transaction_id)?;

    let job = apply(
        state,
        kind,
        id,
        DeliveryChange {
            release_transaction_id: Some(payload.transaction_id.trim().to_string()),
            ..Default::default()
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "delivery_payment_release",
        "deliveries",
        serde_json::json!({
            "kind": kind,
            "order_id": id,
            "transaction_id": job.release_transaction_id,
        }),
    )
    .await;
    Ok(ApiResponse::success("Delivery payment released", job, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(kind: DeliveryKind, status: &str, delivery_status: &str) -> DeliveryJob {
        DeliveryJob {
            kind,
            id: Uuid::new_v4(),
            order_code: "WA-2026-0101-ABC".into(),
            customer_id: Uuid::new_v4(),
            total_amount: 5500,
            delivery_fee: 500,
            payment_method: "cash".into(),
            payment_status: "pending".into(),
            status: status.into(),
            delivery_status: delivery_status.into(),
            delivery_address: "Kandy".into(),
            contact_phone: "0770000000".into(),
            driver_id: None,
            cash_collected: false,
            payment_released: false,
            release_transaction_id: None,
            released_at: None,
            delivered_at: None,
        }
    }

    #[test]
    fn assignment_needs_a_finished_order() {
        assert!(check_assign(&job(DeliveryKind::Orders, "ready_for_delivery", "not_assigned")).is_ok());
        assert!(check_assign(&job(DeliveryKind::Orders, "preparing", "not_assigned")).is_err());
        assert!(check_assign(&job(DeliveryKind::CustomOrders, "completed", "not_assigned")).is_ok());
        assert!(check_assign(&job(DeliveryKind::CustomOrders, "completed", "assigned")).is_err());
    }

    #[test]
    fn status_follows_the_courier_chain() {
        let assigned = job(DeliveryKind::Orders, "ready_for_delivery", "assigned");
        assert!(check_status_change(&assigned, DeliveryStatus::PickedUp).is_ok());
        assert!(check_status_change(&assigned, DeliveryStatus::Delivered).is_err());
        let picked = job(DeliveryKind::Orders, "ready_for_delivery", "picked_up");
        assert!(check_status_change(&picked, DeliveryStatus::Delivered).is_ok());
        let idle = job(DeliveryKind::Orders, "ready_for_delivery", "not_assigned");
        assert!(check_status_change(&idle, DeliveryStatus::PickedUp).is_err());
    }

    #[test]
    fn cancelled_orders_leave_the_courier_flow() {
        let cancelled = job(DeliveryKind::Orders, "cancelled", "in_transit");
        assert!(check_status_change(&cancelled, DeliveryStatus::Delivered).is_err());
        assert!(check_cash_collection(&cancelled).is_err());
        let custom = job(DeliveryKind::CustomOrders, "cancelled", "picked_up");
        assert!(check_status_change(&custom, DeliveryStatus::InTransit).is_err());
        assert!(check_cash_collection(&custom).is_err());
    }

    #[test]
    fn only_the_assigned_driver_acts() {
        let driver = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Delivery,
        };
        let mut assigned = job(DeliveryKind::Orders, "ready_for_delivery", "assigned");
        assert!(check_driver(&assigned, &driver).is_err());
        assigned.driver_id = Some(driver.user_id);
        assert!(check_driver(&assigned, &driver).is_ok());
    }

    #[test]
    fn cash_is_collected_once() {
        let mut cash = job(DeliveryKind::Orders, "ready_for_delivery", "in_transit");
        assert!(check_cash_collection(&cash).is_ok());
        cash.cash_collected = true;
        assert!(check_cash_collection(&cash).is_err());
        cash.payment_method = "bank".into();
        cash.cash_collected = false;
        assert!(check_cash_collection(&cash).is_err());
    }

    #[test]
    fn release_requires_collected_money_and_happens_once() {
        let mut j = job(DeliveryKind::CustomOrders, "completed", "delivered");
        assert!(check_release(&j, "TX-1").is_err());
        j.cash_collected = true;
        assert!(check_release(&j, "").is_err());
        assert!(check_release(&j, "TX-1").is_ok());
        j.payment_released = true;
        assert!(check_release(&j, "TX-2").is_err());
    }
}
