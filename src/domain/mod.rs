//! Business rules that do not need a database: code formats, status machines,
//! payroll and payout arithmetic, and the stock catalogue.

pub mod codes;
pub mod payout;
pub mod salary;
pub mod status;
pub mod stock;
