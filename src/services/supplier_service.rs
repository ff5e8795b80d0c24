use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{status::SupplierStatus, stock::is_known_material},
    dto::inventory::{SupplierPatch, SupplierRequest},
    entity::{PurchaseOrders, Suppliers, purchase_orders, suppliers},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::inventory::{Supplier, SupplierList},
    response::{ApiResponse, Meta},
    routes::params::SupplierQuery,
    state::AppState,
};

/// Lower-cases, de-duplicates and checks supplied materials against the catalogue.
fn normalize_materials(materials: Vec<String>) -> AppResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(materials.len());
    for material in materials {
        let material = material.trim().to_lowercase();
        if !is_known_material(&material) {
            return Err(AppError::BadRequest(format!("Unknown material '{material}'")));
        }
        if !normalized.contains(&material) {
            normalized.push(material);
        }
    }
    Ok(normalized)
}

fn required_text(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub async fn create_supplier(
    state: &AppState,
    user: &AuthUser,
    payload: SupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_role(user, &[Role::Inventory])?;
    let status = match payload.status.as_deref() {
        Some(raw) => raw.parse::<SupplierStatus>()?,
        None => SupplierStatus::Active,
    };
    let model = suppliers::ActiveModel {
        name: Set(required_text(&payload.name, "name")?),
        email: Set(payload.email),
        phone: Set(required_text(&payload.phone, "phone")?),
        address: Set(payload.address),
        materials: Set(serde_json::json!(normalize_materials(payload.materials)?)),
        status: Set(status.to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "supplier_create",
        "suppliers",
        serde_json::json!({ "supplier_id": model.id, "supplier_code": model.supplier_code }),
    )
    .await;
    Ok(ApiResponse::success(
        "Supplier created",
        Supplier::from_model(model)?,
        None,
    ))
}

pub async fn list_suppliers(
    state: &AppState,
    user: &AuthUser,
    query: SupplierQuery,
) -> AppResult<ApiResponse<SupplierList>> {
    ensure_role(user, &[Role::Inventory, Role::Financial])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(q) = query.q.as_ref().map(|q| q.trim()).filter(|q| !q.is_empty()) {
        let pattern = format!("%{q}%");
        condition = condition.add(
            Condition::any()
                .add(suppliers::Column::Name.like(pattern.clone()))
                .add(suppliers::Column::SupplierCode.like(pattern)),
        );
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: SupplierStatus = status.parse()?;
        condition = condition.add(suppliers::Column::Status.eq(status.as_str()));
    }

    let finder = Suppliers::find()
        .filter(condition)
        .order_by_asc(suppliers::Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Supplier::from_model)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(ApiResponse::success(
        "Ok",
        SupplierList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_role(user, &[Role::Inventory, Role::Financial])?;
    let model = find_supplier(state, id).await?;
    Ok(ApiResponse::success(
        "OK",
        Supplier::from_model(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SupplierPatch,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_role(user, &[Role::Inventory])?;
    let mut active: suppliers::ActiveModel = find_supplier(state, id).await?.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text(&name, "name")?);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(required_text(&phone, "phone")?);
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(materials) = payload.materials {
        active.materials = Set(serde_json::json!(normalize_materials(materials)?));
    }
    if let Some(status) = payload.status {
        active.status = Set(status.parse::<SupplierStatus>()?.to_string());
    }
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "supplier_update",
        "suppliers",
        serde_json::json!({ "supplier_id": model.id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Supplier updated",
        Supplier::from_model(model)?,
        None,
    ))
}

pub async fn delete_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_role(user, &[Role::Inventory])?;
    let model = find_supplier(state, id).await?;
    let orders = PurchaseOrders::find()
        .filter(purchase_orders::Column::SupplierId.eq(id))
        .count(&state.orm)
        .await?;
    if orders > 0 {
        return Err(AppError::bad_request(
            "Supplier has purchase orders, mark it inactive instead",
        ));
    }
    model.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "supplier_delete",
        "suppliers",
        serde_json::json!({ "supplier_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Supplier deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

pub(crate) async fn find_supplier(state: &AppState, id: Uuid) -> AppResult<suppliers::Model> {
    Suppliers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materials_are_normalized_and_deduplicated() {
        let materials =
            normalize_materials(vec![" Teak".into(), "teak".into(), "OAK".into()]).unwrap();
        assert_eq!(materials, vec!["teak".to_string(), "oak".to_string()]);
        assert!(normalize_materials(vec!["plastic".into()]).is_err());
    }
}
