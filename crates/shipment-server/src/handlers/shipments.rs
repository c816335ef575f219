//! Shipment handlers

use crate::error::ApiError;
use crate::extractors::{ShipmentId, ShipmentJson};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use shipment_core::{
    validate_shipment, DeletedShipment, Shipment, ShipmentError, ShipmentPayload,
};
use tracing::{debug, error, info, warn};

fn store_failure(op: &str, e: ShipmentError) -> ApiError {
    if !matches!(e, ShipmentError::NotFound(_)) {
        error!("Failed to {} shipment: {}", op, e);
    }
    e.into()
}

fn validated(payload: &ShipmentPayload) -> Result<(), ApiError> {
    validate_shipment(payload).map_err(|e| {
        warn!("Rejected shipment payload: {}", e);
        ApiError::from(e)
    })
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Shipment>>, ApiError> {
    let shipments = state
        .store
        .list()
        .await
        .map_err(|e| store_failure("list", e))?;

    debug!("Listing {} shipments", shipments.len());
    Ok(Json(shipments))
}

pub async fn get(
    State(state): State<AppState>,
    ShipmentId(id): ShipmentId,
) -> Result<Json<Shipment>, ApiError> {
    match state.store.get(id).await {
        Ok(Some(shipment)) => Ok(Json(shipment)),
        Ok(None) => Err(ShipmentError::NotFound(id).into()),
        Err(e) => Err(store_failure("get", e)),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ShipmentJson(payload): ShipmentJson<ShipmentPayload>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    validated(&payload)?;

    let shipment = state
        .store
        .create(payload)
        .await
        .map_err(|e| store_failure("create", e))?;

    info!("Created shipment {}", shipment.id);
    Ok((StatusCode::CREATED, Json(shipment)))
}

pub async fn update(
    State(state): State<AppState>,
    ShipmentId(id): ShipmentId,
    ShipmentJson(payload): ShipmentJson<ShipmentPayload>,
) -> Result<Json<Shipment>, ApiError> {
    validated(&payload)?;

    let shipment = state
        .store
        .update(id, payload)
        .await
        .map_err(|e| store_failure("update", e))?;

    info!("Updated shipment {}", id);
    Ok(Json(shipment))
}

pub async fn delete(
    State(state): State<AppState>,
    ShipmentId(id): ShipmentId,
) -> Result<Json<DeletedShipment>, ApiError> {
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(|e| store_failure("delete", e))?;

    if !deleted {
        return Err(ShipmentError::NotFound(id).into());
    }

    info!("Deleted shipment {}", id);
    Ok(Json(DeletedShipment { deleted_id: id }))
}
