//! Shipment Core Library
//!
//! Domain error, field validation, and the storage port shared by every
//! backing store.

// Re-export pure types from shipment-types
pub use shipment_types::*;

pub mod error;
pub mod ports;
pub mod validation;

pub use error::{Result, ShipmentError};
pub use ports::ShipmentStore;
pub use validation::{parse_id, validate_shipment};
