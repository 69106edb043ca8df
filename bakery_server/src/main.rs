//! Bakery API server.
//!
//! Run from repo root: `cargo run -p bakery-server`
//! Set `BAKERY_STORE=memory` to run without PostgreSQL.

use bakery_api::{
    app, ensure_database_exists, ensure_schema, seed_bakeries, AppState, MemoryStore, PgStore, Settings, StoreKind,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bakery_api=info,bakery_server=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = match settings.store {
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_schema(&pool).await?;
            AppState::new(PgStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::new(MemoryStore::new())
        }
    };
    seed_bakeries(state.store.as_ref(), &settings.seed_bakeries).await?;

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
