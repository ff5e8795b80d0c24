use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DbBackend,
    EntityTrait, QueryFilter, QueryOrder, Statement, TransactionTrait, Value, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::stock::{
        Combination, DEFAULT_REORDER_LEVEL, RELEASE_FLOOR, all_combinations, placeholder_price,
        required_on_hand,
    },
    dto::inventory::{StockReleaseRequest, UpdateStockRequest},
    entity::{Stock, StockReleases, Users, stock, stock_releases},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role, ensure_admin, ensure_role},
    models::inventory::{
        PurchaseOrderLine, StockItem, StockList, StockRelease, StockReleaseList,
        StockReleaseResult, StockSeedResult,
    },
    response::{ApiResponse, Meta},
    routes::params::StockQuery,
    state::AppState,
};

const INSERT_MISSING_SQL: &str = r#"
    INSERT INTO stock (id, material, board_size, thickness, color, available_quantity, reorder_level, unit_price)
    VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
    ON CONFLICT ON CONSTRAINT uq_stock_combination DO NOTHING
"#;

const RESET_SQL: &str = r#"
    INSERT INTO stock (id, material, board_size, thickness, color, available_quantity, reorder_level, unit_price)
    VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
    ON CONFLICT ON CONSTRAINT uq_stock_combination
    DO UPDATE SET available_quantity = 0, unit_price = EXCLUDED.unit_price, updated_at = now()
"#;

const RECEIVE_SQL: &str = r#"
    INSERT INTO stock (id, material, board_size, thickness, color, available_quantity, reorder_level, unit_price)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    ON CONFLICT ON CONSTRAINT uq_stock_combination
    DO UPDATE SET available_quantity = stock.available_quantity + EXCLUDED.available_quantity,
                  updated_at = now()
"#;

/// Bind values for a stock upsert: a fresh id, the combination, then `rest`.
fn combination_values<const N: usize>(combo: Combination, rest: [Value; N]) -> Vec<Value> {
    let mut values: Vec<Value> = vec![
        Uuid::new_v4().into(),
        combo.material.into(),
        combo.board_size.into(),
        combo.thickness.into(),
        combo.color.into(),
    ];
    values.extend(rest);
    values
}

/// Catalogue rows paired with fresh placeholder prices. Drawn up front so no RNG is
/// held across an await.
fn priced_catalogue() -> Vec<(Combination, i64)> {
    let mut rng = rand::thread_rng();
    all_combinations()
        .into_iter()
        .map(|combo| {
            let price = placeholder_price(&mut rng);
            (combo, price)
        })
        .collect()
}

async fn upsert_catalogue(state: &AppState, sql: &str) -> AppResult<u64> {
    let rows = priced_catalogue();
    let txn = state.orm.begin().await?;
    let mut affected = 0;
    for (combo, price) in rows {
        let result = txn
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                sql,
                combination_values(combo, [DEFAULT_REORDER_LEVEL.into(), price.into()]),
            ))
            .await?;
        affected += result.rows_affected();
    }
    txn.commit().await?;
    Ok(affected)
}

/// Creates the missing catalogue rows; existing rows are left alone.
pub async fn initialize_stock(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<StockSeedResult>> {
    ensure_role(user, &[Role::Inventory])?;
    let affected = upsert_catalogue(state, INSERT_MISSING_SQL).await?;
    audit::record(
        &state.pool,
        user.user_id,
        "stock_initialize",
        "stock",
        serde_json::json!({ "inserted": affected }),
    )
    .await;
    tracing::info!(inserted = affected, "stock initialised");
    Ok(ApiResponse::success(
        "Stock initialized",
        StockSeedResult {
            affected,
            combinations: all_combinations().len(),
        },
        None,
    ))
}

/// Zeroes every quantity and draws new prices.
pub async fn reset_stock(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<StockSeedResult>> {
    ensure_admin(user)?;
    let affected = upsert_catalogue(state, RESET_SQL).await?;
    audit::record(
        &state.pool,
        user.user_id,
        "stock_reset",
        "stock",
        serde_json::json!({ "rows": affected }),
    )
    .await;
    tracing::warn!(rows = affected, "stock reset");
    Ok(ApiResponse::success(
        "Stock reset",
        StockSeedResult {
            affected,
            combinations: all_combinations().len(),
        },
        None,
    ))
}

pub async fn randomize_prices(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<StockList>> {
    ensure_role(user, &[Role::Inventory])?;
    let rows = Stock::find().all(&state.orm).await?;
    let prices: Vec<i64> = {
        let mut rng = rand::thread_rng();
        rows.iter().map(|_| placeholder_price(&mut rng)).collect()
    };

    let txn = state.orm.begin().await?;
    let mut items = Vec::with_capacity(rows.len());
    for (row, price) in rows.into_iter().zip(prices) {
        let mut active: stock::ActiveModel = row.into();
        active.unit_price = Set(price);
        items.push(StockItem::from(active.update(&txn).await?));
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "stock_randomize_prices",
        "stock",
        serde_json::json!({ "rows": items.len() }),
    )
    .await;
    Ok(ApiResponse::success("Prices updated", StockList { items }, None))
}

pub async fn list_stock(
    state: &AppState,
    user: &AuthUser,
    query: StockQuery,
) -> AppResult<ApiResponse<StockList>> {
    ensure_role(user, &[Role::Inventory, Role::Designer, Role::StaffDesigner])?;
    let mut condition = Condition::all();
    let filters = [
        (stock::Column::Material, &query.material),
        (stock::Column::BoardSize, &query.board_size),
        (stock::Column::Thickness, &query.thickness),
        (stock::Column::Color, &query.color),
    ];
    for (column, value) in filters {
        if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
            condition = condition.add(column.eq(value.trim().to_lowercase()));
        }
    }
    if query.low_only == Some(true) {
        condition = condition.add(
            Expr::col(stock::Column::AvailableQuantity)
                .lte(Expr::col(stock::Column::ReorderLevel)),
        );
    }
    let items: Vec<StockItem> = Stock::find()
        .filter(condition)
        .order_by_asc(stock::Column::Material)
        .order_by_asc(stock::Column::BoardSize)
        .order_by_asc(stock::Column::Thickness)
        .order_by_asc(stock::Column::Color)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(StockItem::from)
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        StockList { items },
        Some(meta),
    ))
}

pub async fn low_stock(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<StockList>> {
    list_stock(
        state,
        user,
        StockQuery {
            low_only: Some(true),
            ..Default::default()
        },
    )
    .await
}

pub async fn get_stock(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<StockItem>> {
    ensure_role(user, &[Role::Inventory, Role::Designer, Role::StaffDesigner])?;
    let row = find_stock(&state.orm, id).await?;
    Ok(ApiResponse::success("OK", row.into(), Some(Meta::empty())))
}

pub async fn update_stock(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<StockItem>> {
    ensure_role(user, &[Role::Inventory])?;
    let row = find_stock(&state.orm, id).await?;
    let mut active: stock::ActiveModel = row.into();
    if let Some(level) = payload.reorder_level {
        if level < 0 {
            return Err(AppError::bad_request("reorder_level cannot be negative"));
        }
        active.reorder_level = Set(level);
    }
    if let Some(price) = payload.unit_price {
        if price < 0 {
            return Err(AppError::bad_request("unit_price cannot be negative"));
        }
        active.unit_price = Set(price);
    }
    let row = active.update(&state.orm).await?;
    audit::record(
        &state.pool,
        user.user_id,
        "stock_update",
        "stock",
        serde_json::json!({ "stock_id": row.id }),
    )
    .await;
    Ok(ApiResponse::success("Stock updated", row.into(), None))
}

pub async fn release_stock(
    state: &AppState,
    user: &AuthUser,
    payload: StockReleaseRequest,
) -> AppResult<ApiResponse<StockReleaseResult>> {
    ensure_role(user, &[Role::Inventory])?;
    let result = perform_release(
        state,
        user,
        ReleaseOrder {
            stock_id: payload.stock_id,
            designer_id: payload.designer_id,
            quantity: payload.quantity,
            notes: payload.notes,
            material_request_id: None,
        },
    )
    .await?;
    Ok(ApiResponse::success("Stock released", result, None))
}

pub(crate) struct ReleaseOrder {
    pub stock_id: Uuid,
    pub designer_id: Uuid,
    pub quantity: i32,
    pub notes: Option<String>,
    pub material_request_id: Option<Uuid>,
}

/// Hands boards to a designer. The decrement is one conditional UPDATE, so
/// concurrent releases can never take a row below the floor.
pub(crate) async fn perform_release(
    state: &AppState,
    user: &AuthUser,
    order: ReleaseOrder,
) -> AppResult<StockReleaseResult> {
    if order.quantity <= 0 {
        return Err(AppError::bad_request("Quantity must be greater than 0"));
    }
    let designer = Users::find_by_id(order.designer_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("Designer not found"))?;
    if designer.role != Role::Designer.as_str() && designer.role != Role::StaffDesigner.as_str() {
        return Err(AppError::bad_request("Stock can only be released to designers"));
    }

    let required = required_on_hand(order.quantity)
        .ok_or_else(|| AppError::bad_request("Quantity is too large"))?;

    let txn = state.orm.begin().await?;
    let updated = Stock::update_many()
        .col_expr(
            stock::Column::AvailableQuantity,
            Expr::col(stock::Column::AvailableQuantity).sub(order.quantity),
        )
        .filter(stock::Column::Id.eq(order.stock_id))
        .filter(stock::Column::AvailableQuantity.gte(required))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        let row = find_stock(&txn, order.stock_id).await?;
        return Err(AppError::BadRequest(format!(
            "Cannot release {} units: at least {RELEASE_FLOOR} must remain in stock (available {})",
            order.quantity, row.available_quantity
        )));
    }

    let release = stock_releases::ActiveModel {
        stock_id: Set(order.stock_id),
        designer_id: Set(order.designer_id),
        quantity: Set(order.quantity),
        material_request_id: Set(order.material_request_id),
        released_by: Set(user.user_id),
        notes: Set(order.notes),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    let row = find_stock(&txn, order.stock_id).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        user.user_id,
        "stock_release",
        "stock_releases",
        serde_json::json!({
            "release_id": release.id,
            "stock_id": row.id,
            "quantity": release.quantity,
            "designer_id": release.designer_id,
        }),
    )
    .await;
    tracing::info!(
        release_code = %release.release_code,
        quantity = release.quantity,
        remaining = row.available_quantity,
        "stock released"
    );
    Ok(StockReleaseResult {
        release: release.into(),
        stock: row.into(),
    })
}

pub async fn list_releases(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<StockReleaseList>> {
    let mut finder = StockReleases::find().order_by_desc(stock_releases::Column::CreatedAt);
    if user.is(Role::Designer) || user.is(Role::StaffDesigner) {
        finder = finder.filter(stock_releases::Column::DesignerId.eq(user.user_id));
    } else {
        ensure_role(user, &[Role::Inventory])?;
    }
    let items: Vec<StockRelease> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(StockRelease::from)
        .collect();
    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ok",
        StockReleaseList { items },
        Some(meta),
    ))
}

/// Adds received purchase-order quantities, creating rows for unseen combinations.
pub(crate) async fn receive_lines<C>(db: &C, lines: &[PurchaseOrderLine]) -> AppResult<()>
where
    C: ConnectionTrait,
{
    for line in lines {
        let combo = line.combination().normalized()?;
        db.execute(Statement::from_sql_and_values(
            DbBackend::Postgres,
            RECEIVE_SQL,
            combination_values(
                combo,
                [
                    line.quantity.into(),
                    DEFAULT_REORDER_LEVEL.into(),
                    line.unit_price.into(),
                ],
            ),
        ))
        .await?;
    }
    Ok(())
}

pub(crate) async fn find_stock<C>(db: &C, id: Uuid) -> AppResult<stock::Model>
where
    C: ConnectionTrait,
{
    Stock::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_prices_are_drawn_for_every_row() {
        let rows = priced_catalogue();
        assert_eq!(rows.len(), 135);
        assert!(rows.iter().all(|(_, price)| price % 50 == 0 && *price >= 800));
    }
}
