mod common;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use wood_art_gallery_api::{
    domain::stock::RELEASE_FLOOR,
    dto::{
        finance::{CreateSalaryRequest, CreateSupplierPaymentRequest},
        inventory::{CreatePurchaseOrderRequest, StockReleaseRequest, SupplierRequest},
    },
    entity::{Stock, stock},
    error::AppError,
    middleware::auth::Role,
    models::inventory::PurchaseOrderLine,
    services::{
        purchase_order_service, salary_service, stock_service, supplier_payment_service,
        supplier_service,
    },
};

// Releases keep the floor, receiving a purchase order tops the row up and
// supplier payments stay under the order total.
#[tokio::test]
async fn stock_release_receipt_and_supplier_payment_flow() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let inventory = common::create_user(&state, Role::Inventory).await?;
    let finance = common::create_user(&state, Role::Financial).await?;
    let designer = common::create_user(&state, Role::Designer).await?;
    let customer = common::create_user(&state, Role::Customer).await?;

    stock_service::initialize_stock(&state, &inventory).await?;
    let row = Stock::find()
        .filter(stock::Column::Material.eq("walnut"))
        .filter(stock::Column::BoardSize.eq("24x36"))
        .filter(stock::Column::Thickness.eq("6mm"))
        .filter(stock::Column::Color.eq("white"))
        .one(&state.orm)
        .await?
        .expect("catalogue row");
    let mut active: stock::ActiveModel = row.clone().into();
    active.available_quantity = Set(RELEASE_FLOOR + 10);
    active.update(&state.orm).await?;

    let release = |designer_id, quantity| StockReleaseRequest {
        stock_id: row.id,
        designer_id,
        quantity,
        notes: None,
    };
    let to_customer =
        stock_service::release_stock(&state, &inventory, release(customer.user_id, 1)).await;
    assert!(matches!(to_customer, Err(AppError::BadRequest(_))));

    let released = stock_service::release_stock(&state, &inventory, release(designer.user_id, 10))
        .await?
        .data
        .expect("release");
    assert_eq!(released.stock.available_quantity, RELEASE_FLOOR);

    let below_floor =
        stock_service::release_stock(&state, &inventory, release(designer.user_id, 1)).await;
    assert!(matches!(below_floor, Err(AppError::BadRequest(_))));

    let supplier = supplier_service::create_supplier(
        &state,
        &inventory,
        SupplierRequest {
            name: "Lanka Timber".into(),
            email: None,
            phone: "0112345678".into(),
            address: None,
            materials: vec!["Walnut".into(), "walnut".into()],
            status: None,
        },
    )
    .await?
    .data
    .expect("supplier");
    assert_eq!(supplier.materials, vec!["walnut".to_string()]);

    let po = purchase_order_service::create_purchase_order(
        &state,
        &inventory,
        CreatePurchaseOrderRequest {
            supplier_id: supplier.id,
            items: vec![PurchaseOrderLine {
                material: "walnut".into(),
                board_size: "24x36".into(),
                thickness: "6mm".into(),
                color: "white".into(),
                quantity: 40,
                unit_price: 250,
            }],
            expected_date: None,
            notes: None,
        },
    )
    .await?
    .data
    .expect("purchase order");
    assert_eq!(po.total_amount, 10_000);
    assert_eq!(po.payment_status, "unpaid");

    let early = purchase_order_service::receive_purchase_order(&state, &inventory, po.id).await;
    assert!(early.is_err());
    purchase_order_service::approve_purchase_order(&state, &inventory, po.id).await?;
    let received = purchase_order_service::receive_purchase_order(&state, &inventory, po.id)
        .await?
        .data
        .expect("purchase order");
    assert_eq!(received.status, "received");
    let twice = purchase_order_service::receive_purchase_order(&state, &inventory, po.id).await;
    assert!(twice.is_err());

    let topped_up = stock_service::get_stock(&state, &inventory, row.id)
        .await?
        .data
        .expect("stock");
    assert_eq!(topped_up.available_quantity, RELEASE_FLOOR + 40);

    let payment = |amount| CreateSupplierPaymentRequest {
        supplier_id: supplier.id,
        purchase_order_id: Some(po.id),
        amount,
        payment_method: " Bank ".into(),
        notes: None,
    };
    let first = supplier_payment_service::create_supplier_payment(&state, &finance, payment(6_000))
        .await?
        .data
        .expect("payment");
    assert_eq!(first.payment_method, "bank");
    let over =
        supplier_payment_service::create_supplier_payment(&state, &finance, payment(4_001)).await;
    assert!(matches!(over, Err(AppError::BadRequest(_))));
    supplier_payment_service::create_supplier_payment(&state, &finance, payment(4_000)).await?;

    let settled = purchase_order_service::get_purchase_order(&state, &finance, po.id)
        .await?
        .data
        .expect("purchase order");
    assert_eq!(settled.payment_status, "paid");

    supplier_payment_service::delete_supplier_payment(&state, &finance, first.id).await?;
    let reopened = purchase_order_service::get_purchase_order(&state, &finance, po.id)
        .await?
        .data
        .expect("purchase order");
    assert_eq!(reopened.payment_status, "partial");

    let referenced = supplier_service::delete_supplier(&state, &inventory, supplier.id).await;
    assert!(matches!(referenced, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn salary_breakdown_and_period_uniqueness() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let finance = common::create_user(&state, Role::Financial).await?;
    let staff = common::create_user(&state, Role::StaffDesigner).await?;
    let customer = common::create_user(&state, Role::Customer).await?;

    let request = |staff_designer_id| CreateSalaryRequest {
        staff_designer_id,
        month: 3,
        year: 2026,
        basic_salary: 30_000,
        allowances: 2_000,
        loan_installments: 1_000,
        other_deductions: 0,
        tax_percentage: 10.0,
    };
    let salary = salary_service::create_salary(&state, &finance, request(staff.user_id))
        .await?
        .data
        .expect("salary");
    assert_eq!(salary.epf_company_share, 3_600);
    assert_eq!(salary.epf_employee_share, 2_400);
    assert_eq!(salary.etf_company_share, 900);
    assert_eq!(salary.tax_amount, 3_200);
    assert_eq!(salary.gross_salary, 36_500);
    assert_eq!(salary.net_salary, 25_400);
    assert_eq!(salary.status, "pending");
    assert!(salary.salary_code.starts_with("SDS"));

    let duplicate = salary_service::create_salary(&state, &finance, request(staff.user_id)).await;
    assert!(matches!(duplicate, Err(AppError::Duplicate(_))));

    let not_staff =
        salary_service::create_salary(&state, &finance, request(customer.user_id)).await;
    assert!(matches!(not_staff, Err(AppError::BadRequest(_))));

    let paid = salary_service::mark_salary_paid(&state, &finance, salary.id)
        .await?
        .data
        .expect("salary");
    assert_eq!(paid.status, "paid");
    assert!(paid.paid_at.is_some());

    let locked = salary_service::delete_salary(&state, &finance, salary.id).await;
    assert!(locked.is_err());

    let mine = salary_service::my_salaries(&state, &staff)
        .await?
        .data
        .expect("salaries");
    assert_eq!(mine.items.len(), 1);

    Ok(())
}
