use std::collections::HashMap;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Text fields of the design upload form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DesignForm {
    pub item_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub quantity: i32,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
}

/// Partial update; every absent field keeps its value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DesignPatch {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i32>,
    pub material: Option<String>,
    pub board_size: Option<String>,
    pub thickness: Option<String>,
    pub color: Option<String>,
}

impl DesignForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> AppResult<Self> {
        Ok(Self {
            item_name: required(fields, "item_name")?,
            description: fields.get("description").cloned().filter(|d| !d.trim().is_empty()),
            price: parse_required(fields, "price")?,
            quantity: parse_required(fields, "quantity")?,
            material: required(fields, "material")?,
            board_size: required(fields, "board_size")?,
            thickness: required(fields, "thickness")?,
            color: required(fields, "color")?,
        })
    }
}

impl DesignPatch {
    pub fn from_fields(fields: &HashMap<String, String>) -> AppResult<Self> {
        Ok(Self {
            item_name: fields.get("item_name").cloned(),
            description: fields.get("description").cloned(),
            price: parse_optional(fields, "price")?,
            quantity: parse_optional(fields, "quantity")?,
            material: fields.get("material").cloned(),
            board_size: fields.get("board_size").cloned(),
            thickness: fields.get("thickness").cloned(),
            color: fields.get("color").cloned(),
        })
    }
}

pub(crate) fn required(fields: &HashMap<String, String>, name: &str) -> AppResult<String> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
}

pub(crate) fn parse_required<T: std::str::FromStr>(
    fields: &HashMap<String, String>,
    name: &str,
) -> AppResult<T> {
    required(fields, name)?
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be a number")))
}

pub(crate) fn parse_optional<T: std::str::FromStr>(
    fields: &HashMap<String, String>,
    name: &str,
) -> AppResult<Option<T>> {
    match fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{name} must be a number"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_complete_form() {
        let form = DesignForm::from_fields(&fields(&[
            ("item_name", " Elephant wall art "),
            ("price", "4500"),
            ("quantity", "3"),
            ("material", "teak"),
            ("board_size", "18x24"),
            ("thickness", "12mm"),
            ("color", "natural"),
            ("description", ""),
        ]))
        .unwrap();
        assert_eq!(form.item_name, "Elephant wall art");
        assert_eq!(form.price, 4500);
        assert_eq!(form.description, None);
    }

    #[test]
    fn reports_missing_and_malformed_fields() {
        let err = DesignForm::from_fields(&fields(&[("item_name", "x")])).unwrap_err();
        assert_eq!(err.to_string(), "Bad Request price is required");

        let err = DesignPatch::from_fields(&fields(&[("quantity", "many")])).unwrap_err();
        assert_eq!(err.to_string(), "Bad Request quantity must be a number");
    }
}
