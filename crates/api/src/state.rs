use std::sync::Arc;

use pulse_db::DbPool;

use crate::config::ServerConfig;

/// Handler state: the connection pool and the startup configuration.
///
/// Both fields are reference counted, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
