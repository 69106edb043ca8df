//! Bakery handlers: list, read, rename.

use crate::error::{AppError, BAKERY_NOT_FOUND};
use crate::extractors::ValidForm;
use crate::response::{self, BakeryBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct UpdateBakeryForm {
    pub name: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list_bakeries().await?;
    Ok(response::many::<_, BakeryBody>(rows))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    let bakery = state
        .store
        .get_bakery(id)
        .await?
        .ok_or(AppError::NotFound(BAKERY_NOT_FOUND))?;
    Ok(response::ok(BakeryBody::from(bakery)))
}

/// PATCH: only `name` is writable; an absent field leaves the stored value alone.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidForm(form): ValidForm<UpdateBakeryForm>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(name) = &form.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be blank".into()));
        }
    }
    let bakery = state
        .store
        .update_bakery_name(id, form.name.as_deref())
        .await?
        .ok_or(AppError::NotFound(BAKERY_NOT_FOUND))?;
    tracing::info!(id = bakery.id, "bakery updated");
    Ok(response::ok(BakeryBody::from(bakery)))
}
