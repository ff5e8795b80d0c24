use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReleaseDesignerPaymentRequest {
    pub order_id: Uuid,
    pub order_item_id: Option<Uuid>,
    /// Used to locate the line when `order_item_id` is not given.
    pub design_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplierPaymentRequest {
    pub supplier_id: Uuid,
    pub purchase_order_id: Option<Uuid>,
    pub amount: i64,
    pub payment_method: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSalaryRequest {
    pub staff_designer_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub basic_salary: i64,
    #[serde(default)]
    pub allowances: i64,
    #[serde(default)]
    pub loan_installments: i64,
    #[serde(default)]
    pub other_deductions: i64,
    #[serde(default)]
    pub tax_percentage: f64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSalaryRequest {
    pub basic_salary: Option<i64>,
    pub allowances: Option<i64>,
    pub loan_installments: Option<i64>,
    pub other_deductions: Option<i64>,
    pub tax_percentage: Option<f64>,
}
