use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{resolve_file_url, utc};
use crate::entity::{order_items::Model as OrderItemModel, orders::Model as OrderModel};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_code: String,
    pub customer_id: Uuid,
    pub total_amount: i64,
    pub delivery_fee: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub delivery_status: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub bank_slip_id: Option<Uuid>,
    pub bank_slip_url: Option<String>,
    pub stock_deducted: bool,
    pub cash_collected: bool,
    pub payment_released: bool,
    pub release_transaction_id: Option<String>,
    pub released_at: Option<DateTime<Utc>>,
    pub driver_id: Option<Uuid>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub design_id: Uuid,
    pub designer_id: Uuid,
    pub item_code: String,
    pub item_name: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub quantity: i32,
    pub subtotal: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItemsList {
    pub items: Vec<OrderWithItems>,
}

impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            order_code: model.order_code,
            customer_id: model.customer_id,
            total_amount: model.total_amount,
            delivery_fee: model.delivery_fee,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            status: model.status,
            delivery_status: model.delivery_status,
            delivery_address: model.delivery_address,
            contact_phone: model.contact_phone,
            bank_slip_url: resolve_file_url(model.bank_slip_id, model.bank_slip_url),
            bank_slip_id: model.bank_slip_id,
            stock_deducted: model.stock_deducted,
            cash_collected: model.cash_collected,
            payment_released: model.payment_released,
            release_transaction_id: model.release_transaction_id,
            released_at: model.released_at.map(utc),
            driver_id: model.driver_id,
            delivered_at: model.delivered_at.map(utc),
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

impl From<OrderItemModel> for OrderItem {
    fn from(model: OrderItemModel) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            design_id: model.design_id,
            designer_id: model.designer_id,
            item_code: model.item_code,
            item_name: model.item_name,
            image_url: model.image_url,
            price: model.price,
            quantity: model.quantity,
            subtotal: model.subtotal,
        }
    }
}

impl OrderWithItems {
    pub fn new(order: OrderModel, items: Vec<OrderItemModel>) -> Self {
        Self {
            order: order.into(),
            items: items.into_iter().map(OrderItem::from).collect(),
        }
    }
}
