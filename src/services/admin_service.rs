use sea_orm::{
    ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    audit,
    dto::admin::{CountBy, CreateUserRequest, Dashboard},
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_admin},
    models::{
        order::OrderWithItemsList,
        user::{User, UserList},
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, UserQuery},
    services::{
        auth_service::{self, NewUser},
        order_service,
    },
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = Users::find();
    if let Some(role) = query.role.as_ref().filter(|r| !r.is_empty()) {
        let role: Role = role.parse()?;
        finder = finder.filter(users::Column::Role.eq(role.as_str()));
    }
    let finder = finder.order_by_desc(users::Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Creates an account of any role, including staff roles registration refuses.
pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let role: Role = payload.role.parse()?;
    let created = auth_service::insert_user(
        state,
        NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            phone: payload.phone,
            address: payload.address,
            role,
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.user_id,
        "user_create",
        "users",
        serde_json::json!({ "created_user_id": created.id, "role": created.role }),
    )
    .await;
    tracing::info!(user_id = %created.id, role = %created.role, "user created by admin");
    Ok(ApiResponse::success("User created", created.into(), None))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::bad_request("You cannot delete your own account"));
    }
    let target = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    target.delete(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        "user_delete",
        "users",
        serde_json::json!({ "deleted_user_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({ "id": id }),
        None,
    ))
}

async fn count_by(pool: &PgPool, sql: &str) -> AppResult<Vec<CountBy>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|(key, count)| CountBy { key, count })
        .collect())
}

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    ensure_admin(user)?;
    let users_by_role = count_by(
        &state.pool,
        "SELECT role, COUNT(*)::BIGINT FROM users GROUP BY role ORDER BY role",
    )
    .await?;
    let orders_by_status = count_by(
        &state.pool,
        "SELECT status, COUNT(*)::BIGINT FROM orders GROUP BY status ORDER BY status",
    )
    .await?;
    let custom_orders_by_status = count_by(
        &state.pool,
        "SELECT status, COUNT(*)::BIGINT FROM custom_orders GROUP BY status ORDER BY status",
    )
    .await?;
    let (designs, low_stock): (i64, i64) = sqlx::query_as(
        r#"
        SELECT (SELECT COUNT(*) FROM designs)::BIGINT,
               (SELECT COUNT(*) FROM stock WHERE available_quantity <= reorder_level)::BIGINT
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Dashboard",
        Dashboard {
            users_by_role,
            orders_by_status,
            custom_orders_by_status,
            designs,
            low_stock,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderWithItemsList>> {
    ensure_admin(user)?;
    order_service::list_with_items(state, Condition::all(), query).await
}
