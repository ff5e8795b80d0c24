use serde::Serialize;
use utoipa::ToSchema;

/// Paging information for list responses. Single-item responses carry it empty.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    /// A list returned whole, as one page holding every row.
    pub fn unpaged(len: usize) -> Self {
        let total = len as i64;
        Self::new(1, total.max(1), total)
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

/// The envelope every endpoint answers with.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    /// Error body; `data` carries the details a client can show.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            meta: Some(Meta::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaged_lists_report_one_page() {
        let meta = Meta::unpaged(7);
        assert_eq!((meta.page, meta.per_page, meta.total), (Some(1), Some(7), Some(7)));

        let meta = Meta::unpaged(0);
        assert_eq!((meta.page, meta.per_page, meta.total), (Some(1), Some(1), Some(0)));
    }

    #[test]
    fn failure_envelope_is_marked_unsuccessful() {
        let body = ApiResponse::failure("Not Found", serde_json::json!({ "path": "/x" }));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["path"], "/x");
        assert!(json["meta"]["total"].is_null());
    }
}
