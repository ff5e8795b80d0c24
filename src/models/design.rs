use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{resolve_file_url, utc};
use crate::entity::designs::Model as DesignModel;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Design {
    pub id: Uuid,
    pub item_code: String,
    pub designer_id: Uuid,
    pub item_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub quantity: i32,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub image_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DesignModel> for Design {
    fn from(model: DesignModel) -> Self {
        Self {
            id: model.id,
            item_code: model.item_code,
            designer_id: model.designer_id,
            item_name: model.item_name,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
            material: model.material,
            board_size: model.board_size,
            thickness: model.thickness,
            color: model.color,
            image_url: resolve_file_url(model.image_id, model.image_url),
            image_id: model.image_id,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DesignList {
    pub items: Vec<Design>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub design_id: Uuid,
    pub designer_id: Uuid,
    pub item_name: String,
    pub price: i64,
    pub quantity: i32,
    pub available_quantity: i32,
    pub image_url: Option<String>,
    pub line_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub total_items: i32,
    pub total_amount: i64,
}

impl Cart {
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_items = items.iter().map(|line| line.quantity).sum();
        let total_amount = items.iter().map(|line| line.line_total).sum();
        Self {
            items,
            total_items,
            total_amount,
        }
    }
}

impl From<crate::entity::cart_items::Model> for CartLine {
    fn from(model: crate::entity::cart_items::Model) -> Self {
        Self {
            id: model.id,
            design_id: model.design_id,
            designer_id: model.designer_id,
            item_name: model.item_name,
            price: model.price,
            quantity: model.quantity,
            available_quantity: model.available_quantity,
            image_url: model.image_url,
            line_total: model.price * i64::from(model.quantity),
        }
    }
}
