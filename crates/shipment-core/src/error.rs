//! Error types for the shipment service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShipmentError>;

#[derive(Error, Debug)]
pub enum ShipmentError {
    #[error("invalid id")]
    InvalidId,

    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Field-level validation failure; the message names the field
    #[error("{0}")]
    Validation(String),

    #[error("shipment not found")]
    NotFound(i64),

    /// Backing store failure, surfaced verbatim
    #[error("{0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ShipmentError {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ShipmentError::InvalidId | ShipmentError::InvalidJson(_) | ShipmentError::Validation(_)
        )
    }
}
