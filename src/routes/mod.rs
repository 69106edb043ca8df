//! Router assembly.

mod bakery;
mod common;

pub use bakery::bakery_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;

/// Full application router: bakery API plus health/readiness/version.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(bakery_routes(state))
}
