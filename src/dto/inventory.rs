use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::PurchaseOrderLine;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub reorder_level: Option<i32>,
    pub unit_price: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockReleaseRequest {
    pub stock_id: Uuid,
    pub designer_id: Uuid,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaterialRequest {
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReviewMaterialRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplierRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub materials: Option<Vec<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePurchaseOrderRequest {
    pub supplier_id: Uuid,
    pub items: Vec<PurchaseOrderLine>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
