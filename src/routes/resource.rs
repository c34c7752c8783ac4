//! Resource CRUD routes. Parameterized paths; handlers resolve the resource from the registry.

use crate::handlers::resource::{create, delete as delete_handler, list, query, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:resource", get(list).post(create))
        .route(
            "/:resource/:id",
            get(read).patch(update).put(update).delete(delete_handler),
        )
        .route("/:resource/:id/:query", get(query))
        .with_state(state)
}
