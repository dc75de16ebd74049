use std::sync::Arc;

use intake_core::navigation::ViewKey;
use intake_db::OpportunityStore;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Everything one user interaction reads or changes.
///
/// Held behind a single lock so each request sees and persists a consistent
/// table.
#[derive(Debug)]
pub struct AppSession {
    /// The opportunity table.
    pub store: OpportunityStore,
    /// Bumped whenever navigation returns to the list.
    pub view_key: ViewKey,
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<AppSession>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: OpportunityStore, config: ServerConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(AppSession {
                store,
                view_key: ViewKey::default(),
            })),
            config: Arc::new(config),
        }
    }
}
