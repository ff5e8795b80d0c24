use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, entity::prelude::*};

use super::hooks;
use crate::domain::{codes::CodeKind, salary::SalaryInput};

/// One payslip per staff designer and calendar month.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_designer_salaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
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
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModel {
    fn salary_input(&self) -> Option<SalaryInput> {
        Some(SalaryInput {
            basic_salary: hooks::current(&self.basic_salary)?,
            allowances: hooks::current(&self.allowances)?,
            loan_installments: hooks::current(&self.loan_installments)?,
            other_deductions: hooks::current(&self.other_deductions)?,
            tax_percentage: hooks::current(&self.tax_percentage)?,
        })
    }

    fn inputs_changed(&self) -> bool {
        self.basic_salary.is_set()
            || self.allowances.is_set()
            || self.loan_installments.is_set()
            || self.other_deductions.is_set()
            || self.tax_percentage.is_set()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::touch(&mut self.updated_at, insert);

        if insert || self.inputs_changed() {
            let input = self
                .salary_input()
                .ok_or_else(|| DbErr::Custom("salary inputs are incomplete".into()))?;
            let breakdown = input.compute();
            self.epf_company_share = Set(breakdown.epf_company_share);
            self.epf_employee_share = Set(breakdown.epf_employee_share);
            self.etf_company_share = Set(breakdown.etf_company_share);
            self.tax_amount = Set(breakdown.tax_amount);
            self.gross_salary = Set(breakdown.gross_salary);
            self.net_salary = Set(breakdown.net_salary);
        }

        hooks::assign_code(db, &mut self.salary_code, CodeKind::Salary, insert).await?;
        Ok(self)
    }
}
