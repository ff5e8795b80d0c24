mod common;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use wood_art_gallery_api::{
    dto::{
        delivery::{
            AssignDeliveryRequest, ReleaseDeliveryPaymentRequest, UpdateDeliveryStatusRequest,
        },
        design::DesignForm,
        finance::ReleaseDesignerPaymentRequest,
        orders::{CreateOrderRequest, CustomOrderForm, OrderLineRequest, UpdateOrderStatusRequest},
    },
    entity::{StoredFiles, stored_files},
    error::AppError,
    middleware::auth::{AuthUser, Role},
    models::delivery::DeliveryKind,
    services::{
        custom_order_service, delivery_service, design_service, designer_payment_service,
        file_service::UploadedFile, order_service,
    },
    state::AppState,
};

fn image() -> Option<UploadedFile> {
    Some(UploadedFile {
        filename: "elephant.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    })
}

fn design_form(quantity: i32) -> DesignForm {
    DesignForm {
        item_name: "Elephant wall art".into(),
        description: Some("Hand carved".into()),
        price: 5_000,
        quantity,
        material: "teak".into(),
        board_size: "18x24".into(),
        thickness: "12mm".into(),
        color: "natural".into(),
    }
}

fn order_request(
    design_id: uuid::Uuid,
    quantity: i32,
    payment_method: &str,
) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![OrderLineRequest {
            design_id,
            quantity,
        }],
        delivery_address: "12 Temple Road, Kandy".into(),
        contact_phone: "0771234567".into(),
        payment_method: payment_method.into(),
        delivery_fee: None,
    }
}

fn bank_order(design_id: uuid::Uuid, quantity: i32) -> CreateOrderRequest {
    order_request(design_id, quantity, "bank")
}

async fn set_status(
    state: &AppState,
    admin: &AuthUser,
    order_id: uuid::Uuid,
    status: &str,
) -> Result<String, AppError> {
    let order = order_service::update_order_status(
        state,
        admin,
        order_id,
        UpdateOrderStatusRequest {
            status: status.into(),
        },
    )
    .await?
    .data
    .expect("order");
    Ok(order.status)
}

async fn move_delivery(
    state: &AppState,
    driver: &AuthUser,
    order_id: uuid::Uuid,
    delivery_status: &str,
) -> Result<String, AppError> {
    let job = delivery_service::update_delivery_status(
        state,
        driver,
        DeliveryKind::Orders,
        order_id,
        UpdateDeliveryStatusRequest {
            delivery_status: delivery_status.into(),
        },
    )
    .await?
    .data
    .expect("job");
    Ok(job.delivery_status)
}

// Customer buys a design by bank transfer, finance approves it, and the designer is paid once.
#[tokio::test]
async fn approved_order_pays_the_designer_exactly_once() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let designer = common::create_user(&state, Role::Designer).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let finance = common::create_user(&state, Role::Financial).await?;

    let design = design_service::create_design(&state, &designer, design_form(5), image())
        .await?
        .data
        .expect("design");
    assert!(design.item_code.starts_with("ITM-"));

    let placed = order_service::create_order(&state, &customer, bank_order(design.id, 2))
        .await?
        .data
        .expect("order");
    assert_eq!(placed.order.total_amount, 2 * 5_000 + 500);
    assert_eq!(placed.order.payment_status, "pending");

    let remaining = design_service::get_design(&state, design.id)
        .await?
        .data
        .expect("design");
    assert_eq!(remaining.quantity, 3);

    let paid = order_service::approve_payment(&state, &finance, placed.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(paid.payment_status, "paid");

    let request = || ReleaseDesignerPaymentRequest {
        order_id: placed.order.id,
        order_item_id: None,
        design_id: Some(design.id),
    };
    let payment = designer_payment_service::release_designer_payment(&state, &finance, request())
        .await?
        .data
        .expect("payment");
    assert_eq!(payment.subtotal, 10_000);
    assert_eq!(payment.commission, 2_000);
    assert_eq!(payment.designer_amount, 8_000);

    let second =
        designer_payment_service::release_designer_payment(&state, &finance, request()).await;
    assert!(matches!(second, Err(AppError::Duplicate(_))));

    Ok(())
}

#[tokio::test]
async fn denied_bank_payment_returns_the_stock() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let designer = common::create_user(&state, Role::Designer).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let finance = common::create_user(&state, Role::Financial).await?;

    let design = design_service::create_design(&state, &designer, design_form(4), image())
        .await?
        .data
        .expect("design");

    let oversold =
        order_service::create_order(&state, &customer, bank_order(design.id, 5)).await;
    assert!(matches!(oversold, Err(AppError::BadRequest(_))));

    let placed = order_service::create_order(&state, &customer, bank_order(design.id, 4))
        .await?
        .data
        .expect("order");
    // Two finance users deny at once; only one of them may put the stock back.
    let (first, second) = tokio::join!(
        order_service::deny_payment(&state, &finance, placed.order.id),
        order_service::deny_payment(&state, &finance, placed.order.id),
    );
    let (winner, loser) = match (first, second) {
        (Ok(won), Err(lost)) | (Err(lost), Ok(won)) => (won, lost),
        (first, second) => panic!("expected one denial to win: {first:?} / {second:?}"),
    };
    assert!(matches!(loser, AppError::BadRequest(_)));
    let denied = winner.data.expect("order");
    assert_eq!(denied.payment_status, "failed");
    assert_eq!(denied.status, "cancelled");

    let restored = design_service::get_design(&state, design.id)
        .await?
        .data
        .expect("design");
    assert_eq!(restored.quantity, 4);

    let again = order_service::deny_payment(&state, &finance, placed.order.id).await;
    assert!(again.is_err());

    Ok(())
}

fn custom_form(payment_method: &str) -> CustomOrderForm {
    CustomOrderForm {
        description: "Family name board".into(),
        material: "Oak".into(),
        board_size: "24x36".into(),
        thickness: "18mm".into(),
        color: "dark".into(),
        quantity: 1,
        budget: Some(20_000),
        delivery_address: "5 Lake Drive, Galle".into(),
        contact_phone: "0719876543".into(),
        payment_method: payment_method.into(),
        delivery_fee: None,
    }
}

#[tokio::test]
async fn custom_order_payment_depends_on_method() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;

    let cash = custom_order_service::create_custom_order(
        &state,
        &customer,
        custom_form("cash"),
        None,
        None,
    )
    .await?
    .data
    .expect("custom order");
    assert_eq!(cash.payment_status, "paid");
    assert_eq!(cash.status, "pending");
    assert_eq!(cash.material, "oak");

    let missing_slip = custom_order_service::create_custom_order(
        &state,
        &customer,
        custom_form("bank"),
        None,
        None,
    )
    .await;
    assert!(matches!(missing_slip, Err(AppError::BadRequest(_))));

    Ok(())
}

// A paid order cancelled by an admin gives its stock back and never reaches a designer payout.
#[tokio::test]
async fn admin_cancellation_restores_stock_and_blocks_payout() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let designer = common::create_user(&state, Role::Designer).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let finance = common::create_user(&state, Role::Financial).await?;
    let admin = common::create_user(&state, Role::Admin).await?;

    let design = design_service::create_design(&state, &designer, design_form(5), image())
        .await?
        .data
        .expect("design");
    let placed = order_service::create_order(&state, &customer, bank_order(design.id, 2))
        .await?
        .data
        .expect("order");
    order_service::approve_payment(&state, &finance, placed.order.id).await?;

    assert_eq!(set_status(&state, &admin, placed.order.id, "cancelled").await?, "cancelled");
    let restored = design_service::get_design(&state, design.id)
        .await?
        .data
        .expect("design");
    assert_eq!(restored.quantity, 5);

    let again = set_status(&state, &admin, placed.order.id, "cancelled").await;
    assert!(again.is_err());

    let payout = designer_payment_service::release_designer_payment(
        &state,
        &finance,
        ReleaseDesignerPaymentRequest {
            order_id: placed.order.id,
            order_item_id: None,
            design_id: Some(design.id),
        },
    )
    .await;
    assert!(matches!(payout, Err(AppError::BadRequest(_))));

    let pending = designer_payment_service::list_pending_designer_payments(&state, &finance)
        .await?
        .data
        .expect("pending");
    assert!(pending.items.iter().all(|p| p.order_id != placed.order.id));

    Ok(())
}

// A cash order goes from the ready queue to the driver, is paid at the door, and the
// driver's takings are released once.
#[tokio::test]
async fn cash_order_delivery_runs_to_payment_release() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let designer = common::create_user(&state, Role::Designer).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let admin = common::create_user(&state, Role::Admin).await?;
    let driver = common::create_user(&state, Role::Delivery).await?;
    let other_driver = common::create_user(&state, Role::Delivery).await?;
    let finance = common::create_user(&state, Role::Financial).await?;

    let design = design_service::create_design(&state, &designer, design_form(3), image())
        .await?
        .data
        .expect("design");
    let placed =
        order_service::create_order(&state, &customer, order_request(design.id, 1, "cash"))
            .await?
            .data
            .expect("order");
    let id = placed.order.id;

    let early = delivery_service::assign_delivery(
        &state,
        &driver,
        DeliveryKind::Orders,
        id,
        AssignDeliveryRequest::default(),
    )
    .await;
    assert!(matches!(early, Err(AppError::BadRequest(_))));

    for status in ["confirmed", "preparing", "ready_for_delivery"] {
        assert_eq!(set_status(&state, &admin, id, status).await?, status);
    }

    let assigned = delivery_service::assign_delivery(
        &state,
        &driver,
        DeliveryKind::Orders,
        id,
        AssignDeliveryRequest::default(),
    )
    .await?
    .data
    .expect("job");
    assert_eq!(assigned.delivery_status, "assigned");
    assert_eq!(assigned.driver_id, Some(driver.user_id));

    // Once a driver has the order it can no longer be cancelled.
    let cancel = set_status(&state, &admin, id, "cancelled").await;
    assert!(matches!(cancel, Err(AppError::BadRequest(_))));

    let stranger = move_delivery(&state, &other_driver, id, "picked_up").await;
    assert!(matches!(stranger, Err(AppError::Forbidden)));

    assert_eq!(move_delivery(&state, &driver, id, "picked_up").await?, "picked_up");
    assert_eq!(move_delivery(&state, &driver, id, "in_transit").await?, "in_transit");

    let collected = delivery_service::collect_cash(&state, &driver, DeliveryKind::Orders, id)
        .await?
        .data
        .expect("job");
    assert!(collected.cash_collected);
    assert_eq!(collected.payment_status, "paid");
    let twice = delivery_service::collect_cash(&state, &driver, DeliveryKind::Orders, id).await;
    assert!(twice.is_err());

    assert_eq!(move_delivery(&state, &driver, id, "delivered").await?, "delivered");
    let delivered = order_service::get_order(&state, &customer, id)
        .await?
        .data
        .expect("order");
    assert_eq!(delivered.order.status, "delivered");
    assert!(delivered.order.delivered_at.is_some());

    let release = |transaction_id: &str| ReleaseDeliveryPaymentRequest {
        transaction_id: transaction_id.into(),
    };
    let released = delivery_service::release_delivery_payment(
        &state,
        &finance,
        DeliveryKind::Orders,
        id,
        release("TX-1001"),
    )
    .await?
    .data
    .expect("job");
    assert!(released.payment_released);
    assert_eq!(released.release_transaction_id.as_deref(), Some("TX-1001"));

    let again = delivery_service::release_delivery_payment(
        &state,
        &finance,
        DeliveryKind::Orders,
        id,
        release("TX-1002"),
    )
    .await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn bank_custom_order_with_slip_waits_for_review() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let finance = common::create_user(&state, Role::Financial).await?;

    let order = custom_order_service::create_custom_order(
        &state,
        &customer,
        custom_form("bank"),
        image(),
        image(),
    )
    .await?
    .data
    .expect("custom order");
    assert_eq!(order.payment_status, "pending");
    assert_eq!(order.status, "pending");
    assert!(order.bank_slip_id.is_some());
    assert!(order.bank_slip_url.is_some());

    let approved = custom_order_service::approve_custom_payment(&state, &finance, order.id)
        .await?
        .data
        .expect("custom order");
    assert_eq!(approved.payment_status, "paid");

    let twice = custom_order_service::approve_custom_payment(&state, &finance, order.id).await;
    assert!(matches!(twice, Err(AppError::BadRequest(_))));

    Ok(())
}

// A rejected slip must not leave the already-accepted reference image behind.
#[tokio::test]
async fn rejected_custom_order_keeps_no_files() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;

    let bad_slip = UploadedFile {
        filename: "slip.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: vec![b'%', b'P', b'D', b'F'],
    };
    let rejected = custom_order_service::create_custom_order(
        &state,
        &customer,
        custom_form("bank"),
        image(),
        Some(bad_slip),
    )
    .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    let stored = StoredFiles::find()
        .filter(stored_files::Column::UploadedBy.eq(customer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(stored, 0);

    Ok(())
}
