use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::status::{
        CustomOrderStatus, DeliveryStatus, OrderStatus, PaymentMethod, PaymentStatus,
        PurchaseOrderStatus, PurchasePaymentStatus, RequestStatus, SalaryStatus, SupplierStatus,
    },
    dto::{admin, auth as auth_dto, cart as cart_dto, delivery as delivery_dto, finance, inventory, orders as order_dto},
    events::DesignUpdated,
    middleware::auth::Role,
    models::{custom_order, delivery as delivery_models, design, finance as finance_models, inventory as inventory_models, order, user},
    response::{ApiResponse, Meta},
    routes::{
        admin as admin_routes, auth, bank_slips, cart, custom_orders, delivery, designs, events,
        files, financial, health, material_requests, orders, params, purchase_orders, salaries,
        stock, supplier_payments, suppliers,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::update_me,
        designs::list_designs,
        designs::create_design,
        designs::my_designs,
        designs::get_design,
        designs::update_design,
        designs::delete_design,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::create_order,
        orders::list_my_orders,
        orders::list_all_orders,
        orders::list_designer_orders,
        orders::get_order,
        orders::update_order_status,
        orders::cancel_order,
        orders::approve_payment,
        orders::deny_payment,
        custom_orders::create_custom_order,
        custom_orders::list_my_custom_orders,
        custom_orders::list_custom_orders,
        custom_orders::get_custom_order,
        custom_orders::accept_custom_order,
        custom_orders::update_custom_order_status,
        custom_orders::cancel_custom_order,
        custom_orders::approve_custom_payment,
        custom_orders::deny_custom_payment,
        bank_slips::upload_order_bank_slip,
        bank_slips::upload_custom_order_bank_slip,
        delivery::list_delivery_queue,
        delivery::assign_delivery,
        delivery::update_delivery_status,
        delivery::collect_cash,
        delivery::release_delivery_payment,
        stock::list_stock,
        stock::initialize_stock,
        stock::reset_stock,
        stock::randomize_prices,
        stock::low_stock,
        stock::list_releases,
        stock::release_stock,
        stock::get_stock,
        stock::update_stock,
        suppliers::create_supplier,
        suppliers::list_suppliers,
        suppliers::get_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        purchase_orders::create_purchase_order,
        purchase_orders::list_purchase_orders,
        purchase_orders::get_purchase_order,
        purchase_orders::approve_purchase_order,
        purchase_orders::cancel_purchase_order,
        purchase_orders::receive_purchase_order,
        supplier_payments::create_supplier_payment,
        supplier_payments::list_supplier_payments,
        supplier_payments::get_supplier_payment,
        supplier_payments::delete_supplier_payment,
        material_requests::create_material_request,
        material_requests::list_my_material_requests,
        material_requests::list_material_requests,
        material_requests::approve_material_request,
        material_requests::reject_material_request,
        salaries::create_salary,
        salaries::list_salaries,
        salaries::my_salaries,
        salaries::get_salary,
        salaries::update_salary,
        salaries::mark_salary_paid,
        salaries::delete_salary,
        financial::summary,
        financial::monthly,
        financial::release_designer_payment,
        financial::list_designer_payments,
        financial::list_pending_designer_payments,
        financial::my_designer_payments,
        admin_routes::list_users,
        admin_routes::create_user,
        admin_routes::delete_user,
        admin_routes::dashboard,
        admin_routes::list_orders,
        files::get_file,
        events::design_events
    ),
    components(
        schemas(
            Role,
            OrderStatus,
            CustomOrderStatus,
            PaymentStatus,
            PaymentMethod,
            DeliveryStatus,
            PurchaseOrderStatus,
            PurchasePaymentStatus,
            SupplierStatus,
            RequestStatus,
            SalaryStatus,
            user::User,
            user::UserList,
            design::Design,
            design::DesignList,
            design::Cart,
            design::CartLine,
            order::Order,
            order::OrderItem,
            order::OrderWithItems,
            order::OrderWithItemsList,
            custom_order::CustomOrder,
            custom_order::CustomOrderList,
            delivery_models::DeliveryKind,
            delivery_models::DeliveryJob,
            delivery_models::DeliveryJobList,
            inventory_models::StockItem,
            inventory_models::StockList,
            inventory_models::StockRelease,
            inventory_models::StockReleaseList,
            inventory_models::StockReleaseResult,
            inventory_models::StockSeedResult,
            inventory_models::MaterialRequest,
            inventory_models::MaterialRequestList,
            inventory_models::Supplier,
            inventory_models::SupplierList,
            inventory_models::PurchaseOrderLine,
            inventory_models::PurchaseOrder,
            inventory_models::PurchaseOrderList,
            finance_models::DesignerPayment,
            finance_models::DesignerPaymentList,
            finance_models::DesignerEarnings,
            finance_models::PendingDesignerPayment,
            finance_models::PendingDesignerPaymentList,
            finance_models::SupplierPayment,
            finance_models::SupplierPaymentList,
            finance_models::Salary,
            finance_models::SalaryList,
            finance_models::FinancialSummary,
            finance_models::MonthlyFinancials,
            finance_models::MonthlyReport,
            auth_dto::RegisterRequest,
            auth_dto::LoginRequest,
            auth_dto::LoginResponse,
            auth_dto::UpdateProfileRequest,
            cart_dto::AddToCartRequest,
            cart_dto::UpdateCartItemRequest,
            order_dto::OrderLineRequest,
            order_dto::CreateOrderRequest,
            order_dto::UpdateOrderStatusRequest,
            order_dto::AcceptCustomOrderRequest,
            delivery_dto::AssignDeliveryRequest,
            delivery_dto::UpdateDeliveryStatusRequest,
            delivery_dto::ReleaseDeliveryPaymentRequest,
            inventory::UpdateStockRequest,
            inventory::StockReleaseRequest,
            inventory::CreateMaterialRequest,
            inventory::ReviewMaterialRequest,
            inventory::SupplierRequest,
            inventory::SupplierPatch,
            inventory::CreatePurchaseOrderRequest,
            finance::ReleaseDesignerPaymentRequest,
            finance::CreateSupplierPaymentRequest,
            finance::CreateSalaryRequest,
            finance::UpdateSalaryRequest,
            admin::CreateUserRequest,
            admin::CountBy,
            admin::Dashboard,
            params::Pagination,
            params::SortOrder,
            DesignUpdated,
            health::HealthData,
            Meta,
            ApiResponse<user::User>,
            ApiResponse<design::Design>,
            ApiResponse<order::OrderWithItems>,
            ApiResponse<custom_order::CustomOrder>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration, login and profile"),
        (name = "Designs", description = "Marketplace designs"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Orders", description = "Marketplace orders and payment review"),
        (name = "Custom orders", description = "Made-to-order requests"),
        (name = "Bank slips", description = "Bank transfer proof uploads"),
        (name = "Delivery", description = "Courier assignment and cash handling"),
        (name = "Stock", description = "Board stock ledger"),
        (name = "Suppliers", description = "Supplier directory"),
        (name = "Purchase orders", description = "Restocking from suppliers"),
        (name = "Supplier payments", description = "Payments to suppliers"),
        (name = "Material requests", description = "Designer requests for boards"),
        (name = "Salaries", description = "Staff designer payroll"),
        (name = "Financial", description = "Reports and designer payouts"),
        (name = "Admin", description = "User management and dashboard"),
        (name = "Files", description = "Stored images and slips"),
        (name = "Events", description = "Live design updates"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
