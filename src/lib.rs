//! Bakery API: REST backend for bakeries and their baked goods.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;

pub use error::AppError;
pub use model::{BakedGood, Bakery, NewBakedGood};
pub use routes::{app, bakery_routes, common_routes};
pub use settings::{Settings, StoreKind};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, seed_bakeries, BakeryStore, MemoryStore, PgStore};
