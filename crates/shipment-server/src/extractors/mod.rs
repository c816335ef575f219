//! Request extractors that reject with `ApiError` instead of axum's defaults

pub mod id;
pub mod json;

pub use id::ShipmentId;
pub use json::ShipmentJson;
