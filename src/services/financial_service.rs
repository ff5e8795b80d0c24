use chrono::{Datelike, Utc};
use sqlx::FromRow;

use crate::{
    error::AppResult,
    middleware::auth::{AuthUser, Role, ensure_role},
    models::finance::{FinancialSummary, MonthlyFinancials, MonthlyReport},
    response::{ApiResponse, Meta},
    routes::params::{DateRangeQuery, YearQuery},
    state::AppState,
};

// Each total is bounded by the optional [$1, $2) window on the row's settlement date.
const SUMMARY_SQL: &str = r#"
SELECT
    (SELECT COALESCE(SUM(total_amount - delivery_fee), 0)::BIGINT FROM orders
      WHERE payment_status = 'paid' AND status <> 'cancelled'
        AND ($1::timestamptz IS NULL OR created_at >= $1)
        AND ($2::timestamptz IS NULL OR created_at < $2)) AS marketplace_revenue,
    (SELECT COALESCE(SUM(total_amount - delivery_fee), 0)::BIGINT FROM custom_orders
      WHERE payment_status = 'paid' AND status <> 'cancelled'
        AND ($1::timestamptz IS NULL OR created_at >= $1)
        AND ($2::timestamptz IS NULL OR created_at < $2)) AS custom_order_revenue,
    (SELECT COALESCE(SUM(fee), 0)::BIGINT FROM (
        SELECT delivery_fee AS fee, created_at FROM orders
          WHERE payment_status = 'paid' AND status <> 'cancelled'
        UNION ALL
        SELECT delivery_fee AS fee, created_at FROM custom_orders
          WHERE payment_status = 'paid' AND status <> 'cancelled'
      ) fees
      WHERE ($1::timestamptz IS NULL OR created_at >= $1)
        AND ($2::timestamptz IS NULL OR created_at < $2)) AS delivery_fees,
    (SELECT COALESCE(SUM(commission), 0)::BIGINT FROM designer_payments
      WHERE ($1::timestamptz IS NULL OR released_at >= $1)
        AND ($2::timestamptz IS NULL OR released_at < $2)) AS commission_earned,
    (SELECT COALESCE(SUM(designer_amount), 0)::BIGINT FROM designer_payments
      WHERE ($1::timestamptz IS NULL OR released_at >= $1)
        AND ($2::timestamptz IS NULL OR released_at < $2)) AS designer_payouts,
    (SELECT COALESCE(SUM(amount), 0)::BIGINT FROM supplier_payments
      WHERE ($1::timestamptz IS NULL OR created_at >= $1)
        AND ($2::timestamptz IS NULL OR created_at < $2)) AS supplier_payments,
    (SELECT COALESCE(SUM(net_salary), 0)::BIGINT FROM staff_designer_salaries
      WHERE status = 'paid'
        AND ($1::timestamptz IS NULL OR paid_at >= $1)
        AND ($2::timestamptz IS NULL OR paid_at < $2)) AS salaries_paid
"#;

const MONTHLY_SQL: &str = r#"
WITH months AS (SELECT generate_series(1, 12) AS month)
SELECT
    m.month::INT AS month,
    (SELECT COALESCE(SUM(total_amount - delivery_fee), 0)::BIGINT FROM orders
      WHERE payment_status = 'paid' AND status <> 'cancelled'
        AND EXTRACT(YEAR FROM created_at)::INT = $1
        AND EXTRACT(MONTH FROM created_at)::INT = m.month) AS marketplace_revenue,
    (SELECT COALESCE(SUM(total_amount - delivery_fee), 0)::BIGINT FROM custom_orders
      WHERE payment_status = 'paid' AND status <> 'cancelled'
        AND EXTRACT(YEAR FROM created_at)::INT = $1
        AND EXTRACT(MONTH FROM created_at)::INT = m.month) AS custom_order_revenue,
    (SELECT COALESCE(SUM(amount), 0)::BIGINT FROM supplier_payments
      WHERE EXTRACT(YEAR FROM created_at)::INT = $1
        AND EXTRACT(MONTH FROM created_at)::INT = m.month) AS supplier_payments,
    (SELECT COALESCE(SUM(net_salary), 0)::BIGINT FROM staff_designer_salaries
      WHERE status = 'paid' AND year = $1 AND month = m.month) AS salaries_paid
FROM months m
ORDER BY m.month
"#;

#[derive(Debug, FromRow)]
struct SummaryRow {
    marketplace_revenue: i64,
    custom_order_revenue: i64,
    delivery_fees: i64,
    commission_earned: i64,
    designer_payouts: i64,
    supplier_payments: i64,
    salaries_paid: i64,
}

fn net_profit(row: &SummaryRow) -> i64 {
    row.commission_earned + row.custom_order_revenue - row.supplier_payments - row.salaries_paid
}

pub async fn summary(
    state: &AppState,
    user: &AuthUser,
    query: DateRangeQuery,
) -> AppResult<ApiResponse<FinancialSummary>> {
    ensure_role(user, &[Role::Financial])?;
    let row = sqlx::query_as::<_, SummaryRow>(SUMMARY_SQL)
        .bind(query.from)
        .bind(query.to)
        .fetch_one(&state.pool)
        .await?;
    let summary = FinancialSummary {
        from: query.from,
        to: query.to,
        net_profit: net_profit(&row),
        marketplace_revenue: row.marketplace_revenue,
        custom_order_revenue: row.custom_order_revenue,
        delivery_fees: row.delivery_fees,
        commission_earned: row.commission_earned,
        designer_payouts: row.designer_payouts,
        supplier_payments: row.supplier_payments,
        salaries_paid: row.salaries_paid,
    };
    Ok(ApiResponse::success("Ok", summary, Some(Meta::empty())))
}

pub async fn monthly(
    state: &AppState,
    user: &AuthUser,
    query: YearQuery,
) -> AppResult<ApiResponse<MonthlyReport>> {
    ensure_role(user, &[Role::Financial])?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let months = sqlx::query_as::<_, MonthlyFinancials>(MONTHLY_SQL)
        .bind(year)
        .fetch_all(&state.pool)
        .await?;
    Ok(ApiResponse::success(
        "Ok",
        MonthlyReport { year, months },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_counts_commission_and_custom_revenue_against_costs() {
        let row = SummaryRow {
            marketplace_revenue: 100_000,
            custom_order_revenue: 40_000,
            delivery_fees: 2_000,
            commission_earned: 20_000,
            designer_payouts: 80_000,
            supplier_payments: 15_000,
            salaries_paid: 25_400,
        };
        assert_eq!(net_profit(&row), 20_000 + 40_000 - 15_000 - 25_400);
    }

    #[test]
    fn revenue_queries_skip_cancelled_orders() {
        for sql in [SUMMARY_SQL, MONTHLY_SQL] {
            let paid = sql.matches("payment_status = 'paid'").count();
            let live = sql
                .matches("payment_status = 'paid' AND status <> 'cancelled'")
                .count();
            assert!(paid > 0);
            assert_eq!(paid, live);
        }
    }
}
