//! Persisted rows and write inputs.

use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Bakery {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct BakedGood {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// Not checked against `bakeries`; may point at a row that does not exist.
    pub bakery_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated input for inserting a baked good.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBakedGood {
    pub name: String,
    pub price: f64,
    pub bakery_id: i64,
}
