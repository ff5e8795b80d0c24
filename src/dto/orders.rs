use std::collections::HashMap;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::design::{parse_optional, parse_required, required};
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub design_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub delivery_address: String,
    pub contact_phone: String,
    /// `cash` or `bank`.
    pub payment_method: String,
    pub delivery_fee: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AcceptCustomOrderRequest {
    pub price: i64,
    pub notes: Option<String>,
}

/// Text fields of the custom order form; the reference image and bank slip travel as file parts.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CustomOrderForm {
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub budget: Option<i64>,
    pub delivery_address: String,
    pub contact_phone: String,
    pub payment_method: String,
    pub delivery_fee: Option<i64>,
}

impl CustomOrderForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> AppResult<Self> {
        Ok(Self {
            description: required(fields, "description")?,
            material: required(fields, "material")?,
            board_size: required(fields, "board_size")?,
            thickness: required(fields, "thickness")?,
            color: required(fields, "color")?,
            quantity: parse_required(fields, "quantity")?,
            budget: parse_optional(fields, "budget")?,
            delivery_address: required(fields, "delivery_address")?,
            contact_phone: required(fields, "contact_phone")?,
            payment_method: required(fields, "payment_method")?,
            delivery_fee: parse_optional(fields, "delivery_fee")?,
        })
    }
}
