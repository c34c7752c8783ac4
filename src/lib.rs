//! Chinook API: resource-driven CRUD REST backend over SQLite.

pub mod case;
pub mod config;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{load_from_path, resolve, ResourceRegistry, ResourcesConfig, Settings};
pub use error::{AppError, ConfigError};
pub use executor::{SqlExecutor, SqliteExecutor};
pub use response::Envelope;
pub use routes::{app, common_routes, resource_routes};
pub use service::CrudHelper;
pub use sql::{extract_query, ClauseFragment, Data, Filter, ListOptions};
pub use state::AppState;
