use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::utc;
use crate::{
    domain::stock::Combination,
    entity::{
        material_requests::Model as MaterialRequestModel,
        purchase_orders::Model as PurchaseOrderModel, stock::Model as StockModel,
        stock_releases::Model as StockReleaseModel, suppliers::Model as SupplierModel,
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockItem {
    pub id: Uuid,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub available_quantity: i32,
    pub reorder_level: i32,
    pub unit_price: i64,
    pub low_stock: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<StockModel> for StockItem {
    fn from(model: StockModel) -> Self {
        Self {
            id: model.id,
            low_stock: model.available_quantity <= model.reorder_level,
            material: model.material,
            board_size: model.board_size,
            thickness: model.thickness,
            color: model.color,
            available_quantity: model.available_quantity,
            reorder_level: model.reorder_level,
            unit_price: model.unit_price,
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockList {
    pub items: Vec<StockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockRelease {
    pub id: Uuid,
    pub release_code: String,
    pub stock_id: Uuid,
    pub designer_id: Uuid,
    pub quantity: i32,
    pub material_request_id: Option<Uuid>,
    pub released_by: Uuid,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StockReleaseModel> for StockRelease {
    fn from(model: StockReleaseModel) -> Self {
        Self {
            id: model.id,
            release_code: model.release_code,
            stock_id: model.stock_id,
            designer_id: model.designer_id,
            quantity: model.quantity,
            material_request_id: model.material_request_id,
            released_by: model.released_by,
            notes: model.notes,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockReleaseList {
    pub items: Vec<StockRelease>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockReleaseResult {
    pub release: StockRelease,
    pub stock: StockItem,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaterialRequest {
    pub id: Uuid,
    pub request_code: String,
    pub requester_id: Uuid,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub reason: Option<String>,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
    pub stock_release_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaterialRequestModel> for MaterialRequest {
    fn from(model: MaterialRequestModel) -> Self {
        Self {
            id: model.id,
            request_code: model.request_code,
            requester_id: model.requester_id,
            material: model.material,
            board_size: model.board_size,
            thickness: model.thickness,
            color: model.color,
            quantity: model.quantity,
            reason: model.reason,
            status: model.status,
            reviewed_by: model.reviewed_by,
            review_note: model.review_note,
            stock_release_id: model.stock_release_id,
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialRequestList {
    pub items: Vec<MaterialRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: Uuid,
    pub supplier_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub materials: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    pub fn from_model(model: SupplierModel) -> AppResult<Self> {
        let materials = serde_json::from_value(model.materials).map_err(|err| {
            AppError::Internal(anyhow::anyhow!("supplier {} has bad materials: {err}", model.id))
        })?;
        Ok(Self {
            id: model.id,
            supplier_code: model.supplier_code,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            materials,
            status: model.status,
            created_at: utc(model.created_at),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierList {
    pub items: Vec<Supplier>,
}

/// One line of a purchase order, stored inside the order's JSON `items` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderLine {
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub unit_price: i64,
}

impl PurchaseOrderLine {
    pub fn combination(&self) -> Combination {
        Combination::new(&self.material, &self.board_size, &self.thickness, &self.color)
    }

    /// `None` when the amount does not fit in an `i64`.
    pub fn line_total(&self) -> Option<i64> {
        i64::from(self.quantity).checked_mul(self.unit_price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub po_number: String,
    pub supplier_id: Uuid,
    pub items: Vec<PurchaseOrderLine>,
    pub total_amount: i64,
    pub status: String,
    pub payment_status: String,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub received_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn lines(model: &PurchaseOrderModel) -> AppResult<Vec<PurchaseOrderLine>> {
        serde_json::from_value(model.items.clone()).map_err(|err| {
            AppError::Internal(anyhow::anyhow!(
                "purchase order {} has bad items: {err}",
                model.po_number
            ))
        })
    }

    pub fn from_model(model: PurchaseOrderModel) -> AppResult<Self> {
        let items = Self::lines(&model)?;
        Ok(Self {
            id: model.id,
            po_number: model.po_number,
            supplier_id: model.supplier_id,
            items,
            total_amount: model.total_amount,
            status: model.status,
            payment_status: model.payment_status,
            expected_date: model.expected_date,
            notes: model.notes,
            created_by: model.created_by,
            received_at: model.received_at.map(utc),
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseOrderList {
    pub items: Vec<PurchaseOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockSeedResult {
    /// Rows written by the operation.
    pub affected: u64,
    /// Size of the catalogue.
    pub combinations: usize,
}
