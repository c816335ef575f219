//! Strict JSON body extractor

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shipment_core::ShipmentError;

use crate::error::ApiError;

/// Decodes the body as JSON whatever the `Content-Type` header says.
/// Bad syntax, wrong types and unknown fields all become a 400
/// `invalid json: ...`.
pub struct ShipmentJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ShipmentJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            let detail = rejection.body_text();
            tracing::warn!("Failed to read request body: {}", detail);
            ApiError::from(ShipmentError::InvalidJson(detail))
        })?;

        serde_json::from_slice::<T>(&bytes).map(Self).map_err(|e| {
            tracing::warn!("Rejected request body: {}", e);
            ApiError::from(ShipmentError::InvalidJson(e.to_string()))
        })
    }
}
