//! Shared application state for all routes. Built once at startup.

use crate::config::ResourceRegistry;
use crate::executor::SqlExecutor;
use crate::service::CrudHelper;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub helper: Arc<CrudHelper>,
    pub registry: Arc<ResourceRegistry>,
}

impl AppState {
    pub fn new(executor: Arc<dyn SqlExecutor>, registry: ResourceRegistry) -> Self {
        AppState {
            helper: Arc::new(CrudHelper::new(executor)),
            registry: Arc::new(registry),
        }
    }
}
