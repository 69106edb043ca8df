//! Form body extractor that rejects with the crate's JSON error body.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Form fields from a url-encoded or multipart body.
///
/// A request without a form content type carries no form fields and is read as
/// an empty form, so optional-only inputs still extract. A missing or malformed
/// field becomes a 400 `{"error": ...}` instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with(URLENCODED) {
            return match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(ValidForm(value)),
                Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
            };
        }

        let fields = if content_type.starts_with(MULTIPART) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            multipart_text_fields(multipart).await?
        } else {
            Vec::new()
        };
        decode_fields(&fields).map(ValidForm)
    }
}

/// Text fields only; file parts are not form values.
async fn multipart_text_fields(mut multipart: Multipart) -> Result<Vec<(String, String)>, AppError> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(String::from) else {
            continue;
        };
        let value = field.text().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
        fields.push((name, value));
    }
    Ok(fields)
}

fn decode_fields<T: DeserializeOwned>(fields: &[(String, String)]) -> Result<T, AppError> {
    let encoded = serde_urlencoded::to_string(fields)
        .map_err(|e| AppError::BadRequest(format!("Failed to encode form fields: {}", e)))?;
    serde_urlencoded::from_str(&encoded)
        .map_err(|e| AppError::BadRequest(format!("Failed to deserialize form body: {}", e)))
}
