use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    events::EventBus,
    services::file_service::FileStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub events: EventBus,
    pub files: FileStore,
}

impl AppState {
    pub fn new(orm: OrmConn, config: AppConfig) -> Self {
        let pool = orm.get_postgres_connection_pool().clone();
        let files = FileStore::new(&config.base_url);
        Self {
            pool,
            orm,
            config: Arc::new(config),
            events: EventBus::new(),
            files,
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
