//! Shared pieces of the `before_save` hooks.

use chrono::Utc;
use sea_orm::{
    ActiveValue::{self, Set},
    ConnectionTrait, DbErr,
    entity::prelude::*,
};

use crate::domain::codes::{CodeKind, DbCodeRegistry, generate_unique_code};

/// Gives a new row its UUID.
pub fn assign_id(id: &mut ActiveValue<Uuid>) {
    if id.is_not_set() {
        *id = Set(Uuid::new_v4());
    }
}

/// Bumps `updated_at` on every update.
pub fn touch(updated_at: &mut ActiveValue<DateTimeWithTimeZone>, insert: bool) {
    if !insert {
        *updated_at = Set(Utc::now().into());
    }
}

/// Fills in the display code of a new row unless the caller supplied one.
pub async fn assign_code<C>(
    db: &C,
    code: &mut ActiveValue<String>,
    kind: CodeKind,
    insert: bool,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if insert && code.is_not_set() {
        let generated = generate_unique_code(&DbCodeRegistry(db), kind).await?;
        *code = Set(generated);
    }
    Ok(())
}

/// The value an active model currently carries for a column, set or loaded.
pub fn current<V>(value: &ActiveValue<V>) -> Option<V>
where
    V: Into<sea_orm::Value> + Clone,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v.clone()),
        ActiveValue::NotSet => None,
    }
}
