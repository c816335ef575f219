//! Field-level validation for shipment payloads

use crate::error::{Result, ShipmentError};
use shipment_types::ShipmentPayload;

/// Check a payload, reporting the first failing field
pub fn validate_shipment(payload: &ShipmentPayload) -> Result<()> {
    let required = [
        ("nama", &payload.nama),
        ("pengirim", &payload.pengirim),
        ("namaPenerima", &payload.nama_penerima),
        ("alamatPenerima", &payload.alamat_penerima),
        ("namaItem", &payload.nama_item),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ShipmentError::Validation(format!("{} is required", field)));
        }
    }

    if payload.berat_item < 0 {
        return Err(ShipmentError::Validation(
            "beratItem cannot be negative".to_string(),
        ));
    }

    Ok(())
}

/// Parse a path identifier; only positive integers are accepted
pub fn parse_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ShipmentError::InvalidId),
    }
}
