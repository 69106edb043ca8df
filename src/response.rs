//! Response bodies. Each entity has a fixed, explicit set of output fields.

use crate::model::{BakedGood, Bakery};
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakeryBody {
    pub id: i64,
    pub name: String,
}

impl From<Bakery> for BakeryBody {
    fn from(b: Bakery) -> Self {
        Self { id: b.id, name: b.name }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakedGoodBody {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub bakery_id: i64,
}

impl From<BakedGood> for BakedGoodBody {
    fn from(g: BakedGood) -> Self {
        Self {
            id: g.id,
            name: g.name,
            price: g.price,
            bakery_id: g.bakery_id,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn many<T, U>(rows: Vec<T>) -> (StatusCode, Json<Vec<U>>)
where
    U: Serialize + From<T>,
{
    (StatusCode::OK, Json(rows.into_iter().map(U::from).collect()))
}

pub fn message(message: &'static str) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message }))
}
