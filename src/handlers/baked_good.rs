//! Baked good handlers: list, create, read, delete.

use crate::error::{AppError, BAKED_GOOD_NOT_FOUND};
use crate::extractors::ValidForm;
use crate::model::NewBakedGood;
use crate::response::{self, BakedGoodBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

pub const DELETED_MESSAGE: &str = "Baked good deleted successfully";

#[derive(Deserialize, Debug)]
pub struct NewBakedGoodForm {
    pub name: String,
    pub price: f64,
    pub bakery_id: i64,
}

impl TryFrom<NewBakedGoodForm> for NewBakedGood {
    type Error = AppError;

    fn try_from(form: NewBakedGoodForm) -> Result<Self, Self::Error> {
        if form.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be blank".into()));
        }
        if !form.price.is_finite() || form.price < 0.0 {
            return Err(AppError::BadRequest("price must be a non-negative number".into()));
        }
        Ok(NewBakedGood {
            name: form.name,
            price: form.price,
            bakery_id: form.bakery_id,
        })
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list_baked_goods().await?;
    Ok(response::many::<_, BakedGoodBody>(rows))
}

pub async fn create(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<NewBakedGoodForm>,
) -> Result<impl IntoResponse, AppError> {
    let new = NewBakedGood::try_from(form)?;
    let good = state.store.create_baked_good(&new).await?;
    tracing::info!(id = good.id, bakery_id = good.bakery_id, "baked good created");
    Ok(response::created(BakedGoodBody::from(good)))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    let good = state
        .store
        .get_baked_good(id)
        .await?
        .ok_or(AppError::NotFound(BAKED_GOOD_NOT_FOUND))?;
    Ok(response::ok(BakedGoodBody::from(good)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_baked_good(id).await? {
        return Err(AppError::NotFound(BAKED_GOOD_NOT_FOUND));
    }
    tracing::info!(id, "baked good deleted");
    Ok(response::message(DELETED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: f64) -> NewBakedGoodForm {
        NewBakedGoodForm {
            name: name.into(),
            price,
            bakery_id: 1,
        }
    }

    #[test]
    fn valid_form_converts() {
        let new = NewBakedGood::try_from(form("Croissant", 3.5)).unwrap();
        assert_eq!(new.name, "Croissant");
        assert_eq!(new.price, 3.5);
        assert_eq!(new.bakery_id, 1);
    }

    #[test]
    fn blank_name_and_bad_price_are_rejected() {
        assert!(matches!(NewBakedGood::try_from(form("  ", 1.0)), Err(AppError::BadRequest(_))));
        assert!(matches!(NewBakedGood::try_from(form("Scone", f64::NAN)), Err(AppError::BadRequest(_))));
        assert!(matches!(NewBakedGood::try_from(form("Scone", -2.0)), Err(AppError::BadRequest(_))));
    }
}
