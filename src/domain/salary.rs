//! Staff-designer payroll arithmetic.
//!
//! Employer contributions (EPF 12%, ETF 3%) count towards the gross cost of the
//! salary but are not paid out; the employee EPF share (8%), income tax and loan
//! installments are withheld from the take-home amount.

use super::payout::percent_of;

pub const EPF_COMPANY_PERCENT: i64 = 12;
pub const EPF_EMPLOYEE_PERCENT: i64 = 8;
pub const ETF_COMPANY_PERCENT: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryInput {
    pub basic_salary: i64,
    pub allowances: i64,
    pub loan_installments: i64,
    pub other_deductions: i64,
    pub tax_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryBreakdown {
    pub epf_company_share: i64,
    pub epf_employee_share: i64,
    pub etf_company_share: i64,
    pub tax_amount: i64,
    pub gross_salary: i64,
    pub net_salary: i64,
}

impl SalaryInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.basic_salary <= 0 {
            return Err("basic_salary must be greater than 0".into());
        }
        if self.allowances < 0 || self.loan_installments < 0 || self.other_deductions < 0 {
            return Err("allowances and deductions cannot be negative".into());
        }
        if !(0.0..=100.0).contains(&self.tax_percentage) {
            return Err("tax_percentage must be between 0 and 100".into());
        }
        Ok(())
    }

    pub fn compute(&self) -> SalaryBreakdown {
        let epf_company_share = percent_of(self.basic_salary, EPF_COMPANY_PERCENT);
        let epf_employee_share = percent_of(self.basic_salary, EPF_EMPLOYEE_PERCENT);
        let etf_company_share = percent_of(self.basic_salary, ETF_COMPANY_PERCENT);
        let taxable = self.basic_salary + self.allowances;
        let tax_amount = (taxable as f64 * self.tax_percentage / 100.0).round() as i64;
        let gross_salary =
            self.basic_salary + self.allowances + epf_company_share + etf_company_share;
        let net_salary = taxable
            - epf_employee_share
            - tax_amount
            - self.loan_installments
            - self.other_deductions;

        SalaryBreakdown {
            epf_company_share,
            epf_employee_share,
            etf_company_share,
            tax_amount,
            gross_salary,
            net_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_payslip() {
        let breakdown = SalaryInput {
            basic_salary: 30_000,
            allowances: 2_000,
            loan_installments: 1_000,
            other_deductions: 0,
            tax_percentage: 10.0,
        }
        .compute();

        assert_eq!(
            breakdown,
            SalaryBreakdown {
                epf_company_share: 3_600,
                epf_employee_share: 2_400,
                etf_company_share: 900,
                tax_amount: 3_200,
                gross_salary: 36_500,
                net_salary: 25_400,
            }
        );
    }

    #[test]
    fn fractional_tax_rounds_per_field() {
        let breakdown = SalaryInput {
            basic_salary: 45_555,
            allowances: 0,
            loan_installments: 0,
            other_deductions: 250,
            tax_percentage: 6.5,
        }
        .compute();
        assert_eq!(breakdown.epf_company_share, 5_467);
        assert_eq!(breakdown.epf_employee_share, 3_644);
        assert_eq!(breakdown.etf_company_share, 1_367);
        assert_eq!(breakdown.tax_amount, 2_961);
        assert_eq!(breakdown.net_salary, 45_555 - 3_644 - 2_961 - 250);
    }

    #[test]
    fn rejects_out_of_range_tax() {
        let input = SalaryInput {
            basic_salary: 10_000,
            allowances: 0,
            loan_installments: 0,
            other_deductions: 0,
            tax_percentage: 140.0,
        };
        assert!(input.validate().is_err());
    }
}
