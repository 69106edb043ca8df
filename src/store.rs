//! Persistence contract for bakeries and baked goods, plus database bootstrap.
//! Tables are created idempotently at startup; there is no versioned migration step.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::error::AppError;
use crate::model::{BakedGood, Bakery, NewBakedGood};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Operations the HTTP handlers need. Every write is a single statement that has
/// committed by the time the future resolves.
#[async_trait]
pub trait BakeryStore: Send + Sync {
    /// All bakeries ordered by id.
    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError>;

    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, AppError>;

    /// Not exposed over HTTP; used for seeding.
    async fn create_bakery(&self, name: &str) -> Result<Bakery, AppError>;

    /// Sets the name when one is given; `None` leaves the row untouched and reads it back.
    /// Returns `None` when no bakery has this id.
    async fn update_bakery_name(&self, id: i64, name: Option<&str>) -> Result<Option<Bakery>, AppError>;

    /// All baked goods ordered by id.
    async fn list_baked_goods(&self) -> Result<Vec<BakedGood>, AppError>;

    async fn get_baked_good(&self, id: i64) -> Result<Option<BakedGood>, AppError>;

    async fn create_baked_good(&self, new: &NewBakedGood) -> Result<BakedGood, AppError>;

    /// True when a row was removed.
    async fn delete_baked_good(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap liveness probe of the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

const BAKERIES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS bakeries (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ
    )
"#;

// bakery_id intentionally carries no REFERENCES clause.
const BAKED_GOODS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS baked_goods (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        bakery_id BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ
    )
"#;

/// Create `bakeries` and `baked_goods` if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(BAKERIES_DDL).execute(pool).await?;
    sqlx::query(BAKED_GOODS_DDL).execute(pool).await?;
    tracing::debug!("bakery tables ensured");
    Ok(())
}

/// Create the database named in `database_url` if it is missing, via the `postgres` admin database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Config(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the named bakeries when the store holds none. Returns how many were inserted.
pub async fn seed_bakeries(store: &dyn BakeryStore, names: &[String]) -> Result<usize, AppError> {
    if names.is_empty() || !store.list_bakeries().await?.is_empty() {
        return Ok(0);
    }
    for name in names {
        store.create_bakery(name).await?;
    }
    tracing::info!(count = names.len(), "seeded bakeries");
    Ok(names.len())
}

/// Split a connection URL into the admin (`postgres` database) URL and the target
/// database name. A URL with no database path yields an empty name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let authority_start = url
        .find("://")
        .ok_or_else(|| AppError::Config("DATABASE_URL: missing scheme".into()))?
        + 3;
    let rest = url.get(authority_start..).unwrap_or("");
    let authority_len = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
    let authority_end = authority_start + authority_len;
    let base = url.get(..authority_end).unwrap_or(url);
    let after_authority = url.get(authority_end..).unwrap_or("");
    let (path, query) = match after_authority.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (after_authority, None),
    };
    let db_name = path.trim_start_matches('/').trim();
    let admin_url = match query {
        Some(q) => format!("{}/postgres?{}", base, q),
        None => format!("{}/postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_database_name() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/bakery?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres?sslmode=disable");
        assert_eq!(db, "bakery");
    }

    #[test]
    fn url_without_database_keeps_host_and_yields_empty_name() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres");
        assert_eq!(db, "");

        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "");

        let (admin, db) = parse_db_name_from_url("postgres://localhost/?sslmode=require").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=require");
        assert_eq!(db, "");
    }

    #[tokio::test]
    async fn bootstrap_skips_url_without_database() {
        assert!(ensure_database_exists("postgres://localhost").await.is_ok());
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        assert!(matches!(parse_db_name_from_url("bakery"), Err(AppError::Config(_))));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }

    #[tokio::test]
    async fn seeding_only_fills_an_empty_store() {
        let store = MemoryStore::new();
        let names = vec!["Delightful donuts".to_string(), "Incredible crullers".to_string()];
        assert_eq!(seed_bakeries(&store, &names).await.unwrap(), 2);
        assert_eq!(seed_bakeries(&store, &names).await.unwrap(), 0);
        let rows = store.list_bakeries().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Delightful donuts");
    }
}
