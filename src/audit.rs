//! Append-only trail of who changed what. Writes are best-effort: a failed insert is
//! logged and the business operation still succeeds.

use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

const INSERT_SQL: &str = r#"
    INSERT INTO audit_logs (id, user_id, action, resource, metadata)
    VALUES ($1, $2, $3, $4, $5)
"#;

async fn insert(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    resource: &str,
    metadata: &Value,
) -> AppResult<()> {
    sqlx::query(INSERT_SQL)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(action)
        .bind(resource)
        .bind(metadata)
        .execute(pool)
        .await?;
    Ok(())
}

/// Records `action` on `resource` by `user_id`.
pub async fn record(pool: &DbPool, user_id: Uuid, action: &str, resource: &str, metadata: Value) {
    if let Err(err) = insert(pool, Some(user_id), action, resource, &metadata).await {
        tracing::warn!(error = %err, action, resource, %metadata, "audit log failed");
    }
}
