//! HTTP handlers

pub mod health;
pub mod shipments;

pub use health::health;
