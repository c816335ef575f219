//! Shipment Types - Pure type definitions
//!
//! This crate contains only the serde data types exchanged over the HTTP API,
//! with no async runtime or database dependencies.

pub mod shipment;

pub use shipment::*;
