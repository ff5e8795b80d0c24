use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::utc;
use crate::entity::{
    designer_payments::Model as DesignerPaymentModel,
    staff_designer_salaries::Model as SalaryModel,
    supplier_payments::Model as SupplierPaymentModel,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DesignerPayment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub order_item_id: Uuid,
    pub designer_id: Uuid,
    pub design_id: Uuid,
    pub subtotal: i64,
    pub commission: i64,
    pub designer_amount: i64,
    pub released_by: Uuid,
    pub released_at: DateTime<Utc>,
}

impl From<DesignerPaymentModel> for DesignerPayment {
    fn from(model: DesignerPaymentModel) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            order_item_id: model.order_item_id,
            designer_id: model.designer_id,
            design_id: model.design_id,
            subtotal: model.subtotal,
            commission: model.commission,
            designer_amount: model.designer_amount,
            released_by: model.released_by,
            released_at: utc(model.released_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DesignerPaymentList {
    pub items: Vec<DesignerPayment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DesignerEarnings {
    pub items: Vec<DesignerPayment>,
    pub total_subtotal: i64,
    pub total_commission: i64,
    pub total_received: i64,
}

/// A paid order line that has no designer payment yet.
#[derive(Debug, Serialize, ToSchema, FromRow)]
pub struct PendingDesignerPayment {
    pub order_id: Uuid,
    pub order_code: String,
    pub order_item_id: Uuid,
    pub design_id: Uuid,
    pub designer_id: Uuid,
    pub item_name: String,
    pub subtotal: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingDesignerPaymentList {
    pub items: Vec<PendingDesignerPayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierPayment {
    pub id: Uuid,
    pub transaction_code: String,
    pub supplier_id: Uuid,
    pub purchase_order_id: Option<Uuid>,
    pub amount: i64,
    pub payment_method: String,
    pub notes: Option<String>,
    pub paid_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<SupplierPaymentModel> for SupplierPayment {
    fn from(model: SupplierPaymentModel) -> Self {
        Self {
            id: model.id,
            transaction_code: model.transaction_code,
            supplier_id: model.supplier_id,
            purchase_order_id: model.purchase_order_id,
            amount: model.amount,
            payment_method: model.payment_method,
            notes: model.notes,
            paid_by: model.paid_by,
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierPaymentList {
    pub items: Vec<SupplierPayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Salary {
    pub id: Uuid,
    pub salary_code: String,
    pub staff_designer_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub basic_salary: i64,
    pub allowances: i64,
    pub loan_installments: i64,
    pub other_deductions: i64,
    pub tax_percentage: f64,
    pub epf_company_share: i64,
    pub epf_employee_share: i64,
    pub etf_company_share: i64,
    pub tax_amount: i64,
    pub gross_salary: i64,
    pub net_salary: i64,
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<SalaryModel> for Salary {
    fn from(model: SalaryModel) -> Self {
        Self {
            id: model.id,
            salary_code: model.salary_code,
            staff_designer_id: model.staff_designer_id,
            month: model.month,
            year: model.year,
            basic_salary: model.basic_salary,
            allowances: model.allowances,
            loan_installments: model.loan_installments,
            other_deductions: model.other_deductions,
            tax_percentage: model.tax_percentage,
            epf_company_share: model.epf_company_share,
            epf_employee_share: model.epf_employee_share,
            etf_company_share: model.etf_company_share,
            tax_amount: model.tax_amount,
            gross_salary: model.gross_salary,
            net_salary: model.net_salary,
            status: model.status,
            paid_at: model.paid_at.map(utc),
            created_at: utc(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryList {
    pub items: Vec<Salary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialSummary {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub marketplace_revenue: i64,
    pub custom_order_revenue: i64,
    pub delivery_fees: i64,
    pub commission_earned: i64,
    pub designer_payouts: i64,
    pub supplier_payments: i64,
    pub salaries_paid: i64,
    pub net_profit: i64,
}

#[derive(Debug, Serialize, ToSchema, FromRow)]
pub struct MonthlyFinancials {
    pub month: i32,
    pub marketplace_revenue: i64,
    pub custom_order_revenue: i64,
    pub supplier_payments: i64,
    pub salaries_paid: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub year: i32,
    pub months: Vec<MonthlyFinancials>,
}
