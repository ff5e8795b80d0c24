pub mod cart_items;
pub mod custom_orders;
pub mod designer_payments;
pub mod designs;
pub mod hooks;
pub mod material_requests;
pub mod order_items;
pub mod orders;
pub mod purchase_orders;
pub mod staff_designer_salaries;
pub mod stock;
pub mod stock_releases;
pub mod stored_files;
pub mod supplier_payments;
pub mod suppliers;
pub mod users;

pub use cart_items::Entity as CartItems;
pub use custom_orders::Entity as CustomOrders;
pub use designer_payments::Entity as DesignerPayments;
pub use designs::Entity as Designs;
pub use material_requests::Entity as MaterialRequests;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use purchase_orders::Entity as PurchaseOrders;
pub use staff_designer_salaries::Entity as StaffDesignerSalaries;
pub use stock::Entity as Stock;
pub use stock_releases::Entity as StockReleases;
pub use stored_files::Entity as StoredFiles;
pub use supplier_payments::Entity as SupplierPayments;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
