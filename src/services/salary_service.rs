use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{salary::SalaryInput, status::SalaryStatus},
    dto::finance::{CreateSalaryRequest, UpdateSalaryRequest},
    entity::{StaffDesignerSalaries, Users, staff_designer_salaries},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_role},
    models::finance::{Salary, SalaryList},
    response::{ApiResponse, Meta},
    routes::params::SalaryQuery,
    state::AppState,
};

const DUPLICATE_PERIOD: &str = "Salary already exists for this staff designer and month";

fn check_period(month: i32, year: i32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    if !(2000..=9999).contains(&year) {
        return Err(AppError::bad_request("year is out of range"));
    }
    Ok(())
}

/// Input of an existing payslip with the patch applied on top.
fn patched_input(
    model: &staff_designer_salaries::Model,
    patch: &UpdateSalaryRequest,
) -> SalaryInput {
    SalaryInput {
        basic_salary: patch.basic_salary.unwrap_or(model.basic_salary),
        allowances: patch.allowances.unwrap_or(model.allowances),
        loan_installments: patch.loan_installments.unwrap_or(model.loan_installments),
        other_deductions: patch.other_deductions.unwrap_or(model.other_deductions),
        tax_percentage: patch.tax_percentage.unwrap_or(model.tax_percentage),
    }
}

/// Creates a payslip; the entity hook fills in EPF, ETF, tax, gross and net.
pub async fn create_salary(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSalaryRequest,
) -> AppResult<ApiResponse<Salary>> {
    ensure_role(user, &[Role::Financial])?;
    check_period(payload.month, payload.year)?;
    let input = SalaryInput {
        basic_salary: payload.basic_salary,
        allowances: payload.allowances,
        loan_installments: payload.loan_installments,
        other_deductions: payload.other_deductions,
        tax_percentage: payload.tax_percentage,
    };
    input.validate().map_err(AppError::BadRequest)?;

    let staff = Users::find_by_id(payload.staff_designer_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("Staff designer not found"))?;
    if staff.role != Role::StaffDesigner.as_str() {
        return Err(AppError::bad_request("Salaries can only be created for staff designers"));
    }

    let existing = StaffDesignerSalaries::find()
        .filter(staff_designer_salaries::Column::StaffDesignerId.eq(staff.id))
        .filter(staff_designer_salaries::Column::Month.eq(payload.month))
        .filter(staff_designer_salaries::Column::Year.eq(payload.year))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(DUPLICATE_PERIOD.into()));
    }

    let model = staff_designer_salaries::ActiveModel {
        staff_designer_id: Set(staff.id),
        month: Set(payload.month),
        year: Set(payload.year),
        basic_salary: Set(input.basic_salary),
        allowances: Set(input.allowances),
        loan_installments: Set(input.loan_installments),
        other_deductions: Set(input.other_deductions),
        tax_percentage: Set(input.tax_percentage),
        status: Set(SalaryStatus::Pending.to_string()),
        created_by: Set(user.user_id),
        ..Default::default()
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Duplicate(_) => AppError::Duplicate(DUPLICATE_PERIOD.into()),
        other => other,
    })?;

    audit::record(
        &state.pool,
        user.user_id,
        "salary_create",
        "staff_designer_salaries",
        serde_json::json!({
            "salary_id": model.id,
            "salary_code": model.salary_code,
            "net_salary": model.net_salary,
        }),
    )
    .await;
    tracing::info!(salary_code = %model.salary_code, net = model.net_salary, "salary created");
    Ok(ApiResponse::success("Salary created", model.into(), None))
}

pub async fn list_salaries(
    state: &AppState,
    user: &AuthUser,
    query: SalaryQuery,
) -> AppResult<ApiResponse<SalaryList>> {
    ensure_role(user, &[Role::Financial])?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(staff_id) = query.staff_designer_id {
        condition = condition.add(staff_designer_salaries::Column::StaffDesignerId.eq(staff_id));
    }
    if let Some(month) = query.month {
        condition = condition.add(staff_designer_salaries::Column::Month.eq(month));
    }
    if let Some(year) = query.year {
        condition = condition.add(staff_designer_salaries::Column::Year.eq(year));
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status: SalaryStatus = status.parse()?;
        condition = condition.add(staff_designer_salaries::Column::Status.eq(status.as_str()));
    }

    let finder = StaffDesignerSalaries::find()
        .filter(condition)
        .order_by_desc(staff_designer_salaries::Column::Year)
        .order_by_desc(staff_designer_salaries::Column::Month);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Salary::from)
        .collect();
    Ok(ApiResponse::success(
        "Ok",
        SalaryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_salary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Salary>> {
    let model = find_salary(state, id).await?;
    if model.staff_designer_id != user.user_id {
        ensure_role(user, &[Role::Financial])?;
    }
    Ok(ApiResponse::success("OK", model.into(), Some(Meta::empty())))
}

pub async fn my_salaries(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<SalaryList>> {
    ensure_role(user, &[Role::StaffDesigner])?;
    let items: Vec<Salary> = StaffDesignerSalaries::find()
        .filter(staff_designer_salaries::Column::StaffDesignerId.eq(user.user_id))
        .order_by_desc(staff_designer_salaries::Column::Year)
        .order_by_desc(staff_designer_salaries::Column::Month)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Salary::from)
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        SalaryList { items },
        Some(meta),
    ))
}

pub async fn update_salary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSalaryRequest,
) -> AppResult<ApiResponse<Salary>> {
    ensure_role(user, &[Role::Financial])?;
    let model = find_salary(state, id).await?;
    ensure_pending(&model)?;
    patched_input(&model, &payload)
        .validate()
        .map_err(AppError::BadRequest)?;

    let mut active: staff_designer_salaries::ActiveModel = model.into();
    if let Some(value) = payload.basic_salary {
        active.basic_salary = Set(value);
    }
    if let Some(value) = payload.allowances {
        active.allowances = Set(value);
    }
    if let Some(value) = payload.loan_installments {
        active.loan_installments = Set(value);
    }
    if let Some(value) = payload.other_deductions {
        active.other_deductions = Set(value);
    }
    if let Some(value) = payload.tax_percentage {
        active.tax_percentage = Set(value);
    }
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "salary_update",
        "staff_designer_salaries",
        serde_json::json!({ "salary_id": model.id, "net_salary": model.net_salary }),
    )
    .await;
    Ok(ApiResponse::success("Salary updated", model.into(), None))
}

pub async fn mark_salary_paid(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Salary>> {
    ensure_role(user, &[Role::Financial])?;
    let model = find_salary(state, id).await?;
    ensure_pending(&model)?;
    let mut active: staff_designer_salaries::ActiveModel = model.into();
    active.status = Set(SalaryStatus::Paid.to_string());
    active.paid_at = Set(Some(Utc::now().into()));
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "salary_paid",
        "staff_designer_salaries",
        serde_json::json!({ "salary_id": model.id, "net_salary": model.net_salary }),
    )
    .await;
    tracing::info!(salary_code = %model.salary_code, "salary marked paid");
    Ok(ApiResponse::success("Salary marked as paid", model.into(), None))
}

pub async fn delete_salary(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_role(user, &[Role::Financial])?;
    let model = find_salary(state, id).await?;
    ensure_pending(&model)?;
    model.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "salary_delete",
        "staff_designer_salaries",
        serde_json::json!({ "salary_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Salary deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

fn ensure_pending(model: &staff_designer_salaries::Model) -> AppResult<()> {
    if model.status != SalaryStatus::Pending.as_str() {
        return Err(AppError::bad_request("Only pending salaries can be changed"));
    }
    Ok(())
}

async fn find_salary(state: &AppState, id: Uuid) -> AppResult<staff_designer_salaries::Model> {
    StaffDesignerSalaries::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_bounds() {
        assert!(check_period(1, 2025).is_ok());
        assert!(check_period(12, 2025).is_ok());
        assert!(check_period(0, 2025).is_err());
        assert!(check_period(13, 2025).is_err());
    }
}
