pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod custom_order_service;
pub mod delivery_service;
pub mod design_service;
pub mod designer_payment_service;
pub mod file_service;
pub mod financial_service;
pub mod material_request_service;
pub mod order_service;
pub mod purchase_order_service;
pub mod salary_service;
pub mod stock_service;
pub mod supplier_payment_service;
pub mod supplier_service;
