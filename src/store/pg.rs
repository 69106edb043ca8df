//! PostgreSQL-backed store. Each call checks a connection out of the pool for one
//! statement; the guard returns it on drop, including on error paths.

use super::BakeryStore;
use crate::error::AppError;
use crate::model::{BakedGood, Bakery, NewBakedGood};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

const BAKERY_COLUMNS: &str = "id, name, created_at, updated_at";
const BAKED_GOOD_COLUMNS: &str = "id, name, price, bakery_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn conn(&self) -> Result<PoolConnection<Postgres>, AppError> {
        Ok(self.pool.acquire().await?)
    }
}

#[async_trait]
impl BakeryStore for PgStore {
    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        let sql = format!("SELECT {} FROM bakeries ORDER BY id", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let mut conn = self.conn().await?;
        let rows = sqlx::query_as::<_, Bakery>(&sql).fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, AppError> {
        let sql = format!("SELECT {} FROM bakeries WHERE id = $1", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, Bakery>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn create_bakery(&self, name: &str) -> Result<Bakery, AppError> {
        let sql = format!("INSERT INTO bakeries (name) VALUES ($1) RETURNING {}", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, bakery = %name, "query");
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, Bakery>(&sql)
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn update_bakery_name(&self, id: i64, name: Option<&str>) -> Result<Option<Bakery>, AppError> {
        let Some(name) = name else {
            return self.get_bakery(id).await;
        };
        let sql = format!(
            "UPDATE bakeries SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            BAKERY_COLUMNS
        );
        tracing::debug!(sql = %sql, id, bakery = %name, "query");
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, Bakery>(&sql)
            .bind(name)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn list_baked_goods(&self) -> Result<Vec<BakedGood>, AppError> {
        let sql = format!("SELECT {} FROM baked_goods ORDER BY id", BAKED_GOOD_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let mut conn = self.conn().await?;
        let rows = sqlx::query_as::<_, BakedGood>(&sql).fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    async fn get_baked_good(&self, id: i64) -> Result<Option<BakedGood>, AppError> {
        let sql = format!("SELECT {} FROM baked_goods WHERE id = $1", BAKED_GOOD_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, BakedGood>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn create_baked_good(&self, new: &NewBakedGood) -> Result<BakedGood, AppError> {
        let sql = format!(
            "INSERT INTO baked_goods (name, price, bakery_id) VALUES ($1, $2, $3) RETURNING {}",
            BAKED_GOOD_COLUMNS
        );
        tracing::debug!(sql = %sql, params = ?new, "query");
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, BakedGood>(&sql)
            .bind(&new.name)
            .bind(new.price)
            .bind(new.bakery_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn delete_baked_good(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM baked_goods WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.conn().await?;
        let result = sqlx::query(sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        sqlx::query("SELECT 1").fetch_optional(&mut *conn).await?;
        Ok(())
    }
}
