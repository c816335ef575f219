//! Shipment id path extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use shipment_core::{parse_id, ShipmentError};

use crate::error::ApiError;

/// Positive integer id taken from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ShipmentId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(ShipmentError::InvalidId))?;

        parse_id(&raw).map(ShipmentId).map_err(|e| {
            tracing::warn!("Rejected shipment id {:?}", raw);
            e.into()
        })
    }
}
