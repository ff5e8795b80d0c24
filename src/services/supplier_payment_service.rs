use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::status::{PurchaseOrderStatus, PurchasePaymentStatus},
    dto::finance::CreateSupplierPaymentRequest,
    entity::{PurchaseOrders, SupplierPayments, purchase_orders, supplier_payments},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::finance::{SupplierPayment, SupplierPaymentList},
    response::{ApiResponse, Meta},
    routes::params::SupplierPaymentQuery,
    services::supplier_service::find_supplier,
    state::AppState,
};

/// Rejects a payment that would take a purchase order past its total.
fn check_within_total(already_paid: i64, amount: i64, total: i64) -> AppResult<()> {
    let remaining = total - already_paid;
    if amount > remaining {
        return Err(AppError::BadRequest(format!(
            "Payment of {amount} exceeds the outstanding balance of {remaining}"
        )));
    }
    Ok(())
}

async fn paid_towards<C>(db: &C, purchase_order_id: Uuid) -> AppResult<i64>
where
    C: ConnectionTrait,
{
    let paid = SupplierPayments::find()
        .filter(supplier_payments::Column::PurchaseOrderId.eq(purchase_order_id))
        .all(db)
        .await?
        .iter()
        .map(|p| p.amount)
        .sum();
    Ok(paid)
}

/// Recomputes a purchase order's payment status from its recorded payments.
async fn refresh_po_payment_status<C>(db: &C, po: purchase_orders::Model) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let paid = paid_towards(db, po.id).await?;
    let status = PurchasePaymentStatus::for_amounts(paid, po.total_amount);
    if po.payment_status != status.as_str() {
        let mut active: purchase_orders::ActiveModel = po.into();
        active.payment_status = Set(status.to_string());
        active.update(db).await?;
    }
    Ok(())
}

pub async fn create_supplier_payment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSupplierPaymentRequest,
) -> AppResult<ApiResponse<SupplierPayment>> {
    ensure_role(user, &[Role::Financial])?;
    if payload.amount <= 0 {
        return Err(AppError::bad_request("Amount must be greater than 0"));
    }
    let method = payload.payment_method.trim().to_lowercase();
    if method.is_empty() {
        return Err(AppError::bad_request("payment_method is required"));
    }
    find_supplier(state, payload.supplier_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound => AppError::bad_request("Supplier not found"),
            other => other,
        })?;

    let txn = state.orm.begin().await?;
    let po = match payload.purchase_order_id {
        Some(po_id) => {
            // Locked so two concurrent payments cannot both fit under the total.
            let po = PurchaseOrders::find_by_id(po_id)
                .lock(LockType::Update)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::bad_request("Purchase order not found"))?;
            if po.supplier_id != payload.supplier_id {
                return Err(AppError::bad_request(
                    "Purchase order belongs to another supplier",
                ));
            }
            if po.status == PurchaseOrderStatus::Cancelled.as_str() {
                return Err(AppError::bad_request("Purchase order is cancelled"));
            }
            let already_paid = paid_towards(&txn, po.id).await?;
            check_within_total(already_paid, payload.amount, po.total_amount)?;
            Some(po)
        }
        None => None,
    };

    let payment = supplier_payments::ActiveModel {
        supplier_id: Set(payload.supplier_id),
        purchase_order_id: Set(payload.purchase_order_id),
        amount: Set(payload.amount),
        payment_method: Set(method),
        notes: Set(payload.notes),
        paid_by: Set(user.user_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    if let Some(po) = po {
        refresh_po_payment_status(&txn, po).await?;
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "supplier_payment_create",
        "supplier_payments",
        serde_json::json!({
            "payment_id": payment.id,
            "transaction_code": payment.transaction_code,
            "amount": payment.amount,
        }),
    )
    .await;
    tracing::info!(
        transaction_code = %payment.transaction_code,
        amount = payment.amount,
        "supplier payment recorded"
    );
    Ok(ApiResponse::success(
        "Supplier payment recorded",
        payment.into(),
        None,
    ))
}

pub async fn list_supplier_payments(
    state: &AppState,
    user: &AuthUser,
    query: SupplierPaymentQuery,
) -> AppResult<ApiResponse<SupplierPaymentList>> {
    ensure_role(user, &[Role::Financial])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = SupplierPayments::find();
    if let Some(supplier_id) = query.supplier_id {
        finder = finder.filter(supplier_payments::Column::SupplierId.eq(supplier_id));
    }
    let finder = finder.order_by_desc(supplier_payments::Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(SupplierPayment::from)
        .collect();
    Ok(ApiResponse::success(
        "Ok",
        SupplierPaymentList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_supplier_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<SupplierPayment>> {
    ensure_role(user, &[Role::Financial])?;
    let payment = SupplierPayments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", payment.into(), Some(Meta::empty())))
}

/// Deletes a payment and puts the linked purchase order's payment status back in line.
pub async fn delete_supplier_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_role(user, &[Role::Financial])?;
    let txn = state.orm.begin().await?;
    let payment = SupplierPayments::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let po_id = payment.purchase_order_id;
    let amount = payment.amount;
    payment.delete(&txn).await?;
    if let Some(po_id) = po_id {
        let po = PurchaseOrders::find_by_id(po_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        if let Some(po) = po {
            refresh_po_payment_status(&txn, po).await?;
        }
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "supplier_payment_delete",
        "supplier_payments",
        serde_json::json!({ "payment_id": id, "amount": amount }),
    )
    .await;
    Ok(ApiResponse::success(
        "Supplier payment deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_cannot_exceed_the_order_total() {
        assert!(check_within_total(0, 1_000, 1_000).is_ok());
        assert!(check_within_total(600, 400, 1_000).is_ok());
        let err = check_within_total(600, 401, 1_000).unwrap_err();
        assert!(err.to_string().contains("outstanding balance of 400"));
    }
}
