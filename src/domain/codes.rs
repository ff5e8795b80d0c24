//! Human-readable display codes.
//!
//! Every ledger row is keyed by a UUID; the codes here are the identifiers staff and
//! customers read on screens and receipts. A candidate is derived from the clock and a
//! random suffix, checked against the owning table, and regenerated on a clash at most
//! [`MAX_CODE_ATTEMPTS`] times. The table's UNIQUE constraint stays authoritative.

use std::{fmt, future::Future};

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, Statement};
use thiserror::Error;

pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Prefix of the error raised when every attempt collided.
pub const CODE_EXHAUSTED: &str = "could not generate unique code";

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Order,
    CustomOrder,
    Design,
    PurchaseOrder,
    Salary,
    SupplierPayment,
    StockRelease,
    MaterialRequest,
    Supplier,
}

impl CodeKind {
    /// Table and column holding this kind of code.
    fn location(self) -> (&'static str, &'static str) {
        match self {
            CodeKind::Order => ("orders", "order_code"),
            CodeKind::CustomOrder => ("custom_orders", "order_code"),
            CodeKind::Design => ("designs", "item_code"),
            CodeKind::PurchaseOrder => ("purchase_orders", "po_number"),
            CodeKind::Salary => ("staff_designer_salaries", "salary_code"),
            CodeKind::SupplierPayment => ("supplier_payments", "transaction_code"),
            CodeKind::StockRelease => ("stock_releases", "release_code"),
            CodeKind::MaterialRequest => ("material_requests", "request_code"),
            CodeKind::Supplier => ("suppliers", "supplier_code"),
        }
    }

    pub fn candidate<R: Rng + ?Sized>(self, now: DateTime<Utc>, rng: &mut R) -> String {
        let millis = now.timestamp_millis().unsigned_abs();
        match self {
            CodeKind::Order | CodeKind::CustomOrder => format!(
                "WA-{}-{}-{}",
                now.format("%Y"),
                now.format("%m%d"),
                alphanumeric(rng, 3)
            ),
            CodeKind::Design => {
                format!("ITM-{:04}-{}", millis % 10_000, alphanumeric(rng, 6))
            }
            CodeKind::PurchaseOrder => {
                format!("PO-{}-{}", now.format("%Y%m%d"), alphanumeric(rng, 4))
            }
            CodeKind::Salary => format!(
                "SDS{}{:02}{}",
                now.year(),
                now.month(),
                digits(rng, 4)
            ),
            CodeKind::SupplierPayment => {
                format!("TXN-{:06}-{}", millis % 1_000_000, digits(rng, 3))
            }
            CodeKind::StockRelease => {
                format!("SR-{}-{}", now.format("%Y%m%d"), alphanumeric(rng, 4))
            }
            CodeKind::MaterialRequest => {
                format!("MR-{}-{}", now.format("%Y%m%d"), alphanumeric(rng, 4))
            }
            CodeKind::Supplier => format!("SUP-{}", alphanumeric(rng, 6)),
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeKind::Order => "order",
            CodeKind::CustomOrder => "custom order",
            CodeKind::Design => "design",
            CodeKind::PurchaseOrder => "purchase order",
            CodeKind::Salary => "salary",
            CodeKind::SupplierPayment => "supplier payment",
            CodeKind::StockRelease => "stock release",
            CodeKind::MaterialRequest => "material request",
            CodeKind::Supplier => "supplier",
        };
        f.write_str(name)
    }
}

fn alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char)
        .collect()
}

fn digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("{CODE_EXHAUSTED} for {0} after {MAX_CODE_ATTEMPTS} attempts")]
    Exhausted(CodeKind),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<CodeError> for DbErr {
    fn from(err: CodeError) -> Self {
        match err {
            CodeError::Db(db) => db,
            exhausted => DbErr::Custom(exhausted.to_string()),
        }
    }
}

/// Answers whether a candidate code is already in use.
pub trait CodeRegistry {
    fn is_taken(
        &self,
        kind: CodeKind,
        code: &str,
    ) -> impl Future<Output = Result<bool, DbErr>> + Send;
}

/// Checks candidates against the owning table on any sea-orm connection or transaction.
pub struct DbCodeRegistry<'a, C>(pub &'a C);

impl<C> CodeRegistry for DbCodeRegistry<'_, C>
where
    C: ConnectionTrait + Sync,
{
    fn is_taken(
        &self,
        kind: CodeKind,
        code: &str,
    ) -> impl Future<Output = Result<bool, DbErr>> + Send {
        let (table, column) = kind.location();
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            format!("SELECT 1 AS hit FROM {table} WHERE {column} = $1 LIMIT 1"),
            [code.to_owned().into()],
        );
        let conn = self.0;
        async move { Ok(conn.query_one(stmt).await?.is_some()) }
    }
}

pub async fn generate_unique_code<R>(registry: &R, kind: CodeKind) -> Result<String, CodeError>
where
    R: CodeRegistry + Sync,
{
    generate_unique_code_with(registry, kind, || {
        kind.candidate(Utc::now(), &mut rand::thread_rng())
    })
    .await
}

pub async fn generate_unique_code_with<R, F>(
    registry: &R,
    kind: CodeKind,
    mut next_candidate: F,
) -> Result<String, CodeError>
where
    R: CodeRegistry + Sync,
    F: FnMut() -> String + Send,
{
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let candidate = next_candidate();
        if !registry.is_taken(kind, &candidate).await? {
            return Ok(candidate);
        }
        tracing::warn!(%kind, attempt, code = %candidate, "generated code already taken");
    }
    Err(CodeError::Exhausted(kind))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    struct AlwaysTaken {
        calls: AtomicUsize,
    }

    impl CodeRegistry for AlwaysTaken {
        fn is_taken(
            &self,
            _kind: CodeKind,
            _code: &str,
        ) -> impl Future<Output = Result<bool, DbErr>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(true) }
        }
    }

    struct Taken(Mutex<Vec<String>>);

    impl CodeRegistry for Taken {
        fn is_taken(
            &self,
            _kind: CodeKind,
            code: &str,
        ) -> impl Future<Output = Result<bool, DbErr>> + Send {
            let hit = self.0.lock().unwrap().iter().any(|c| c == code);
            async move { Ok(hit) }
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn five_collisions_fail_with_explicit_error() {
        let registry = AlwaysTaken {
            calls: AtomicUsize::new(0),
        };
        let err = generate_unique_code_with(&registry, CodeKind::Order, || "WA-2025-0307-AAA".into())
            .await
            .unwrap_err();

        assert!(matches!(err, CodeError::Exhausted(CodeKind::Order)));
        assert!(err.to_string().starts_with("could not generate unique code"));
        assert_eq!(registry.calls.load(Ordering::SeqCst), MAX_CODE_ATTEMPTS);

        let db: DbErr = err.into();
        assert!(matches!(db, DbErr::Custom(msg) if msg.starts_with(CODE_EXHAUSTED)));
    }

    #[tokio::test]
    async fn retries_past_a_clash() {
        let registry = Taken(Mutex::new(vec!["PO-20250307-AAAA".into()]));
        let mut candidates = vec!["PO-20250307-BBBB".to_string(), "PO-20250307-AAAA".to_string()];
        let code = generate_unique_code_with(&registry, CodeKind::PurchaseOrder, || {
            candidates.pop().unwrap()
        })
        .await
        .unwrap();
        assert_eq!(code, "PO-20250307-BBBB");
    }

    #[test]
    fn candidates_follow_their_formats() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = fixed_now();

        let order = CodeKind::Order.candidate(now, &mut rng);
        assert!(order.starts_with("WA-2025-0307-"));
        assert_eq!(order.len(), "WA-2025-0307-XXX".len());

        let design = CodeKind::Design.candidate(now, &mut rng);
        let parts: Vec<&str> = design.split('-').collect();
        assert_eq!(parts[0], "ITM");
        assert_eq!(parts[1].len(), 4);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);

        let po = CodeKind::PurchaseOrder.candidate(now, &mut rng);
        assert!(po.starts_with("PO-20250307-"));
        assert_eq!(po.len(), "PO-20250307-XXXX".len());

        let salary = CodeKind::Salary.candidate(now, &mut rng);
        assert!(salary.starts_with("SDS202503"));
        assert_eq!(salary.len(), "SDS202503".len() + 4);

        let txn = CodeKind::SupplierPayment.candidate(now, &mut rng);
        let parts: Vec<&str> = txn.split('-').collect();
        assert_eq!(parts[0], "TXN");
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn random_parts_use_uppercase_alphanumerics() {
        let mut rng = StdRng::seed_from_u64(42);
        let code = CodeKind::Supplier.candidate(fixed_now(), &mut rng);
        let suffix = code.trim_start_matches("SUP-");
        assert_eq!(suffix.len(), 6);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
