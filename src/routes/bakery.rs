//! Bakery and baked good routes.

use crate::handlers::{baked_good, bakery, index};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn bakery_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/bakeries", get(bakery::list))
        .route("/bakeries/:id", get(bakery::read).patch(bakery::update))
        .route("/baked_goods", get(baked_good::list).post(baked_good::create))
        .route(
            "/baked_goods/:id",
            get(baked_good::read).delete(baked_good::delete),
        )
        .with_state(state)
}
