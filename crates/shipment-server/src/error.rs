//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shipment_core::ShipmentError;

/// Error returned by handlers and extractors, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ShipmentError> for ApiError {
    fn from(e: ShipmentError) -> Self {
        let status = if e.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if matches!(e, ShipmentError::NotFound(_)) {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ShipmentError::InvalidId, StatusCode::BAD_REQUEST),
            (
                ShipmentError::InvalidJson("eof".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShipmentError::Validation("nama is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ShipmentError::NotFound(9), StatusCode::NOT_FOUND),
            (
                ShipmentError::Database("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ShipmentError::Config("bad port".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.is_client_error(), status == StatusCode::BAD_REQUEST);
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_store_message_is_passed_through() {
        let err = ApiError::from(ShipmentError::Database("relation \"shipments\" does not exist".to_string()));
        assert_eq!(err.message, "relation \"shipments\" does not exist");

        let err = ApiError::from(ShipmentError::NotFound(9));
        assert_eq!(err.message, "shipment not found");
    }
}
