use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{resolve_file_url, utc};
use crate::entity::custom_orders::Model as CustomOrderModel;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomOrder {
    pub id: Uuid,
    pub order_code: String,
    pub customer_id: Uuid,
    pub staff_designer_id: Option<Uuid>,
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub budget: Option<i64>,
    pub price: Option<i64>,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub delivery_status: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub reference_image_id: Option<Uuid>,
    pub reference_image_url: Option<String>,
    pub bank_slip_id: Option<Uuid>,
    pub bank_slip_url: Option<String>,
    pub cash_collected: bool,
    pub payment_released: bool,
    pub release_transaction_id: Option<String>,
    pub released_at: Option<DateTime<Utc>>,
    pub driver_id: Option<Uuid>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomOrderList {
    pub items: Vec<CustomOrder>,
}

impl From<CustomOrderModel> for CustomOrder {
    fn from(model: CustomOrderModel) -> Self {
        Self {
            id: model.id,
            order_code: model.order_code,
            customer_id: model.customer_id,
            staff_designer_id: model.staff_designer_id,
            description: model.description,
            material: model.material,
            board_size: model.board_size,
            thickness: model.thickness,
            color: model.color,
            quantity: model.quantity,
            budget: model.budget,
            price: model.price,
            delivery_fee: model.delivery_fee,
            total_amount: model.total_amount,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            status: model.status,
            delivery_status: model.delivery_status,
            delivery_address: model.delivery_address,
            contact_phone: model.contact_phone,
            reference_image_url: resolve_file_url(
                model.reference_image_id,
                model.reference_image_url,
            ),
            reference_image_id: model.reference_image_id,
            bank_slip_url: resolve_file_url(model.bank_slip_id, model.bank_slip_url),
            bank_slip_id: model.bank_slip_id,
            cash_collected: model.cash_collected,
            payment_released: model.payment_released,
            release_transaction_id: model.release_transaction_id,
            released_at: model.released_at.map(utc),
            driver_id: model.driver_id,
            delivered_at: model.delivered_at.map(utc),
            notes: model.notes,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}
