use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;
use wood_art_gallery_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::users::ActiveModel as UserActive,
    middleware::auth::{AuthUser, Role},
    state::AppState,
};

/// Connects to the test database, or `None` when none is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let config = AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 3000,
        base_url: "http://127.0.0.1:3000".into(),
        jwt_secret: "test-secret".into(),
    };
    Ok(Some(AppState::new(orm, config)))
}

/// Inserts a user with a unique email and returns it as an authenticated caller.
pub async fn create_user(state: &AppState, role: Role) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        name: Set(format!("Test {role}")),
        email: Set(format!("{role}-{}@test.local", Uuid::new_v4())),
        password_hash: Set("not-a-real-hash".into()),
        role: Set(role.as_str().to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser {
        user_id: user.id,
        role,
    })
}
