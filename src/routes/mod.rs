use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod bank_slips;
pub mod cart;
pub mod custom_orders;
pub mod delivery;
pub mod designs;
pub mod doc;
pub mod events;
pub mod files;
pub mod financial;
pub mod health;
pub mod material_requests;
pub mod multipart;
pub mod orders;
pub mod params;
pub mod purchase_orders;
pub mod salaries;
pub mod stock;
pub mod supplier_payments;
pub mod suppliers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/user", auth::router())
        .nest("/design", designs::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/customOrder", custom_orders::router())
        .nest("/bankSlip", bank_slips::router())
        .nest("/delivery", delivery::router())
        .nest("/stock", stock::router())
        .nest("/suppliers", suppliers::router())
        .nest("/purchase-orders", purchase_orders::router())
        .nest("/supplier-payments", supplier_payments::router())
        .nest("/material-requests", material_requests::router())
        .nest("/staff-designer-salaries", salaries::router())
        .nest("/financial", financial::router())
        .nest("/admin", admin::router())
        .nest("/files", files::router())
        .nest("/events", events::router())
}
