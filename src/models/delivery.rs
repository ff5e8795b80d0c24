use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::utc;
use crate::entity::{custom_orders::Model as CustomOrderModel, orders::Model as OrderModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryKind {
    Orders,
    CustomOrders,
}

/// The delivery-relevant part of either kind of order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeliveryJob {
    pub kind: DeliveryKind,
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
    pub driver_id: Option<Uuid>,
    pub cash_collected: bool,
    pub payment_released: bool,
    pub release_transaction_id: Option<String>,
    pub released_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryJobList {
    pub items: Vec<DeliveryJob>,
}

impl From<OrderModel> for DeliveryJob {
    fn from(model: OrderModel) -> Self {
        Self {
            kind: DeliveryKind::Orders,
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
            driver_id: model.driver_id,
            cash_collected: model.cash_collected,
            payment_released: model.payment_released,
            release_transaction_id: model.release_transaction_id,
            released_at: model.released_at.map(utc),
            delivered_at: model.delivered_at.map(utc),
        }
    }
}

impl From<CustomOrderModel> for DeliveryJob {
    fn from(model: CustomOrderModel) -> Self {
        Self {
            kind: DeliveryKind::CustomOrders,
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
            driver_id: model.driver_id,
            cash_collected: model.cash_collected,
            payment_released: model.payment_released,
            release_transaction_id: model.release_transaction_id,
            released_at: model.released_at.map(utc),
            delivered_at: model.delivered_at.map(utc),
        }
    }
}
