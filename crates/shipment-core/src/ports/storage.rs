//! Storage trait for shipment persistence

use crate::Result;
use async_trait::async_trait;
use shipment_types::{Shipment, ShipmentPayload};

/// Shipment store
///
/// Implemented by the in-memory fallback and the relational backends. One
/// implementation is selected at startup and shared by every handler.
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    /// All shipments in ascending id order
    async fn list(&self) -> Result<Vec<Shipment>>;

    /// `Ok(None)` when no shipment has this id
    async fn get(&self, id: i64) -> Result<Option<Shipment>>;

    /// Insert a new shipment, assigning its id and creation time.
    /// A missing event time defaults to now.
    async fn create(&self, payload: ShipmentPayload) -> Result<Shipment>;

    /// Replace every field except id and creation time.
    /// A missing event time keeps the stored one.
    /// Fails with `ShipmentError::NotFound` if the id is unknown.
    async fn update(&self, id: i64, payload: ShipmentPayload) -> Result<Shipment>;

    /// Returns whether a shipment was removed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}
