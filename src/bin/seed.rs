use uuid::Uuid;
use wood_art_gallery_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    domain::stock::{DEFAULT_REORDER_LEVEL, all_combinations, placeholder_price},
    middleware::auth::Role,
    services::auth_service::hash_password,
};

const STAFF: [(&str, &str, Role); 6] = [
    ("Gallery Admin", "admin@woodart.local", Role::Admin),
    ("Inventory Desk", "inventory@woodart.local", Role::Inventory),
    ("Finance Desk", "finance@woodart.local", Role::Financial),
    ("Courier One", "delivery@woodart.local", Role::Delivery),
    ("Studio Designer", "staff.designer@woodart.local", Role::StaffDesigner),
    ("Guest Designer", "designer@woodart.local", Role::Designer),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = orm.get_postgres_connection_pool();

    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "woodart123".to_string());
    for (name, email, role) in STAFF {
        let id = ensure_user(pool, name, email, &password, role).await?;
        println!("Ensured user {email} (role={role}, id={id})");
    }
    let inserted = seed_stock(pool).await?;

    println!("Seed completed. {inserted} stock rows created");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, updated_at = now()
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Creates any missing catalogue rows with zero quantity.
async fn seed_stock(pool: &sqlx::PgPool) -> anyhow::Result<u64> {
    let rows: Vec<_> = {
        let mut rng = rand::thread_rng();
        all_combinations()
            .into_iter()
            .map(|combo| (combo, placeholder_price(&mut rng)))
            .collect()
    };

    let mut inserted = 0;
    for (combo, price) in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO stock (id, material, board_size, thickness, color, available_quantity, reorder_level, unit_price)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
            ON CONFLICT ON CONSTRAINT uq_stock_combination DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(combo.material)
        .bind(combo.board_size)
        .bind(combo.thickness)
        .bind(combo.color)
        .bind(DEFAULT_REORDER_LEVEL)
        .bind(price)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}
