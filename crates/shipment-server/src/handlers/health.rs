//! Liveness probe

/// `GET /` answers `OK` while the process is up
pub async fn health() -> &'static str {
    "OK"
}
