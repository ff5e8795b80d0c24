//! Response shapes. Each view is built from its entity row by an explicit mapping so
//! the JSON contract does not drift with the table layout.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

pub mod custom_order;
pub mod delivery;
pub mod design;
pub mod finance;
pub mod inventory;
pub mod order;
pub mod user;

pub(crate) fn utc(value: DateTimeWithTimeZone) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

/// Path of a stored file; the stored absolute URL is the fallback for older rows.
pub fn resolve_file_url(file_id: Option<Uuid>, legacy_url: Option<String>) -> Option<String> {
    file_id
        .map(|id| format!("/api/files/{id}"))
        .or(legacy_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_wins_over_legacy_url() {
        let id = Uuid::new_v4();
        assert_eq!(
            resolve_file_url(Some(id), Some("http://old/uploads/a.png".into())),
            Some(format!("/api/files/{id}"))
        );
        assert_eq!(
            resolve_file_url(None, Some("http://old/uploads/a.png".into())).as_deref(),
            Some("http://old/uploads/a.png")
        );
        assert_eq!(resolve_file_url(None, None), None);
    }
}
