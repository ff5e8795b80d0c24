use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        status::{
            CustomOrderStatus, DeliveryStatus, PaymentMethod, PaymentStatus, parse_stored,
            transition_error,
        },
        stock::Combination,
    },
    dto::orders::{AcceptCustomOrderRequest, CustomOrderForm, UpdateOrderStatusRequest},
    entity::{CustomOrders, custom_orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::custom_order::{CustomOrder, CustomOrderList},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::{
        file_service::{Bucket, UploadedFile},
        order_service::{DEFAULT_DELIVERY_FEE, ensure_slip_accepted},
    },
    state::AppState,
};

/// Payment state a new custom order starts in, and whether it needs a bank slip.
pub fn initial_payment(method: PaymentMethod, has_slip: bool) -> AppResult<PaymentStatus> {
    if method == PaymentMethod::Bank && !has_slip {
        return Err(AppError::bad_request(
            "Bank slip is required for bank transfer payments",
        ));
    }
    Ok(method.initial_custom_order_payment())
}

pub async fn create_custom_order(
    state: &AppState,
    user: &AuthUser,
    form: CustomOrderForm,
    reference_image: Option<UploadedFile>,
    bank_slip: Option<UploadedFile>,
) -> AppResult<ApiResponse<CustomOrder>> {
    ensure_role(user, &[Role::Customer])?;
    if form.quantity <= 0 {
        return Err(AppError::bad_request("Quantity must be greater than 0"));
    }
    if form.budget.is_some_and(|b| b < 0) {
        return Err(AppError::bad_request("Budget cannot be negative"));
    }
    let delivery_fee = form.delivery_fee.unwrap_or(DEFAULT_DELIVERY_FEE);
    if delivery_fee < 0 {
        return Err(AppError::bad_request("Delivery fee cannot be negative"));
    }
    let combo =
        Combination::new(&form.material, &form.board_size, &form.thickness, &form.color)
            .normalized()?;
    let method: PaymentMethod = form.payment_method.parse()?;
    let payment_status = initial_payment(method, bank_slip.is_some())?;

    let txn = state.orm.begin().await?;
    let reference = match reference_image {
        Some(file) => Some(
            state
                .files
                .save(&txn, Bucket::Images, file, Some(user.user_id))
                .await?,
        ),
        None => None,
    };
    // Cash orders never carry a slip.
    let slip = match bank_slip.filter(|_| method == PaymentMethod::Bank) {
        Some(file) => Some(
            state
                .files
                .save(&txn, Bucket::Uploads, file, Some(user.user_id))
                .await?,
        ),
        None => None,
    };

    let model = custom_orders::ActiveModel {
        customer_id: Set(user.user_id),
        description: Set(form.description),
        material: Set(combo.material),
        board_size: Set(combo.board_size),
        thickness: Set(combo.thickness),
        color: Set(combo.color),
        quantity: Set(form.quantity),
        budget: Set(form.budget),
        price: Set(None),
        delivery_fee: Set(delivery_fee),
        total_amount: Set(delivery_fee),
        payment_method: Set(method.to_string()),
        payment_status: Set(payment_status.to_string()),
        status: Set(CustomOrderStatus::Pending.to_string()),
        delivery_status: Set(DeliveryStatus::NotAssigned.to_string()),
        delivery_address: Set(form.delivery_address),
        contact_phone: Set(form.contact_phone),
        reference_image_id: Set(reference.as_ref().map(|f| f.id)),
        reference_image_url: Set(reference.map(|f| f.url)),
        bank_slip_id: Set(slip.as_ref().map(|f| f.id)),
        bank_slip_url: Set(slip.map(|f| f.url)),
        cash_collected: Set(false),
        payment_released: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_create",
        "custom_orders",
        serde_json::json!({ "custom_order_id": model.id, "order_code": model.order_code }),
    )
    .await;
    tracing::info!(custom_order_id = %model.id, order_code = %model.order_code, %payment_status, "custom order created");
    Ok(ApiResponse::success(
        "Custom order placed",
        model.into(),
        None,
    ))
}

pub async fn list_my_custom_orders(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<CustomOrderList>> {
    let condition = Condition::all().add(custom_orders::Column::CustomerId.eq(user.user_id));
    list_filtered(state, condition, query).await
}

pub async fn list_custom_orders(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<CustomOrderList>> {
    ensure_role(user, &[Role::StaffDesigner, Role::Financial, Role::Delivery])?;
    list_filtered(state, Condition::all(), query).await
}

async fn list_filtered(
    state: &AppState,
    mut condition: Condition,
    query: StatusQuery,
) -> AppResult<ApiResponse<CustomOrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: CustomOrderStatus = status.parse()?;
        condition = condition.add(custom_orders::Column::Status.eq(status.as_str()));
    }
    let finder = CustomOrders::find()
        .filter(condition)
        .order_by_desc(custom_orders::Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CustomOrder::from)
        .collect();
    Ok(ApiResponse::success(
        "Ok",
        CustomOrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_custom_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CustomOrder>> {
    let order = find_custom_order(&state.orm, id).await?;
    if order.customer_id != user.user_id && !user.role.is_staff() {
        return Err(AppError::Forbidden);
    }
    Ok(ApiResponse::success("OK", order.into(), Some(Meta::empty())))
}

/// A staff designer takes on a pending request and quotes its price.
pub async fn accept_custom_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AcceptCustomOrderRequest,
) -> AppResult<ApiResponse<CustomOrder>> {
    ensure_role(user, &[Role::StaffDesigner])?;
    if payload.price <= 0 {
        return Err(AppError::bad_request("Price must be greater than 0"));
    }
    let order = find_custom_order(&state.orm, id).await?;
    let current: CustomOrderStatus = parse_stored(&order.status)?;
    if !current.can_transition_to(CustomOrderStatus::Accepted) {
        return Err(transition_error(
            "custom order",
            current,
            CustomOrderStatus::Accepted,
        ));
    }

    let total = payload.price + order.delivery_fee;
    let mut active: custom_orders::ActiveModel = order.into();
    active.staff_designer_id = Set(Some(user.user_id));
    active.price = Set(Some(payload.price));
    active.total_amount = Set(total);
    active.status = Set(CustomOrderStatus::Accepted.to_string());
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_accept",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id, "price": payload.price }),
    )
    .await;
    Ok(ApiResponse::success("Custom order accepted", order.into(), None))
}

pub async fn update_custom_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<CustomOrder>> {
    ensure_role(user, &[Role::StaffDesigner])?;
    let next: CustomOrderStatus = payload.status.parse()?;
    let order = find_custom_order(&state.orm, id).await?;
    if !user.is(Role::Admin) && order.staff_designer_id != Some(user.user_id) {
        return Err(AppError::Forbidden);
    }
    let current: CustomOrderStatus = parse_stored(&order.status)?;
    if !current.can_transition_to(next) {
        return Err(transition_error("custom order", current, next));
    }

    let mut active: custom_orders::ActiveModel = order.into();
    active.status = Set(next.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_status_update",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id, "from": current, "to": next }),
    )
    .await;
    Ok(ApiResponse::success(
        "Custom order status updated",
        order.into(),
        None,
    ))
}

pub async fn cancel_custom_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CustomOrder>> {
    let order = find_custom_order(&state.orm, id).await?;
    if order.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    if order.status != CustomOrderStatus::Pending.as_str() {
        return Err(AppError::bad_request(
            "Only pending custom orders can be cancelled",
        ));
    }
    let mut active: custom_orders::ActiveModel = order.into();
    active.status = Set(CustomOrderStatus::Cancelled.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_cancel",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id }),
    )
    .await;
    Ok(ApiResponse::success("Custom order cancelled", order.into(), None))
}

fn ensure_pending_bank_payment(order: &custom_orders::Model) -> AppResult<()> {
    let method: PaymentMethod = parse_stored(&order.payment_method)?;
    let payment: PaymentStatus = parse_stored(&order.payment_status)?;
    if method != PaymentMethod::Bank || payment != PaymentStatus::Pending {
        return Err(AppError::bad_request(
            "Only pending bank transfer payments can be reviewed",
        ));
    }
    Ok(())
}

pub async fn approve_custom_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CustomOrder>> {
    ensure_role(user, &[Role::Financial])?;
    let order = find_custom_order(&state.orm, id).await?;
    ensure_pending_bank_payment(&order)?;

    let mut active: custom_orders::ActiveModel = order.into();
    active.payment_status = Set(PaymentStatus::Paid.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_payment_approve",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id }),
    )
    .await;
    Ok(ApiResponse::success("Payment approved", order.into(), None))
}

pub async fn deny_custom_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CustomOrder>> {
    ensure_role(user, &[Role::Financial])?;
    let order = find_custom_order(&state.orm, id).await?;
    ensure_pending_bank_payment(&order)?;

    let mut active: custom_orders::ActiveModel = order.into();
    active.payment_status = Set(PaymentStatus::Failed.to_string());
    active.status = Set(CustomOrderStatus::Cancelled.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_payment_deny",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id }),
    )
    .await;
    Ok(ApiResponse::success("Payment denied", order.into(), None))
}

pub async fn upload_bank_slip(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    file: UploadedFile,
) -> AppResult<ApiResponse<CustomOrder>> {
    let order = find_custom_order(&state.orm, id).await?;
    if order.customer_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    ensure_slip_accepted(&order.payment_method, &order.payment_status)?;
    if order.status == CustomOrderStatus::Cancelled.as_str() {
        return Err(AppError::bad_request(
            "Cannot upload a bank slip for a cancelled order",
        ));
    }

    let saved = state
        .files
        .save(&state.orm, Bucket::Uploads, file, Some(user.user_id))
        .await?;
    let mut active: custom_orders::ActiveModel = order.into();
    active.bank_slip_id = Set(Some(saved.id));
    active.bank_slip_url = Set(Some(saved.url));
    active.payment_status = Set(PaymentStatus::Pending.to_string());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "custom_order_bank_slip_upload",
        "custom_orders",
        serde_json::json!({ "custom_order_id": order.id, "file_id": saved.id }),
    )
    .await;
    Ok(ApiResponse::success("Bank slip uploaded", order.into(), None))
}

pub(crate) async fn find_custom_order<C>(db: &C, id: Uuid) -> AppResult<custom_orders::Model>
where
    C: ConnectionTrait,
{
    CustomOrders::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_starts_paid_and_bank_waits_for_review() {
        assert_eq!(
            initial_payment(PaymentMethod::Cash, false).unwrap(),
            PaymentStatus::Paid
        );
        assert_eq!(
            initial_payment(PaymentMethod::Bank, true).unwrap(),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn bank_without_slip_is_rejected() {
        let err = initial_payment(PaymentMethod::Bank, false).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
