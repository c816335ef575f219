//! Storage layer
//!
//! One `ShipmentStore` is chosen at startup from `DATABASE_URL`:
//! PostgreSQL or SQLite when a URL is set, the in-memory store otherwise.

pub mod memory;
pub mod postgres;
pub mod sqlite;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use shipment_core::{Shipment, ShipmentError, ShipmentStore};
use std::sync::Arc;
use tracing::info;

use crate::settings::ServerConfig;

/// Which backing store a process runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite(String),
    Postgres(String),
}

impl Backend {
    /// Pick a backend from the connection string; `None` means in-memory
    pub fn from_url(url: Option<&str>) -> shipment_core::Result<Self> {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Ok(Backend::Memory);
        };

        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres(url.to_string()))
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite(url.to_string()))
        } else {
            Err(ShipmentError::Config(format!(
                "unsupported DATABASE_URL scheme: {}",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Open the backing store for this process.
///
/// A configured database that cannot be reached is an error; there is no
/// fallback to memory once a URL is set.
pub async fn open(config: &ServerConfig) -> Result<Arc<dyn ShipmentStore>> {
    let backend = Backend::from_url(config.database_url.as_deref())?;

    let store: Arc<dyn ShipmentStore> = match backend {
        Backend::Memory => {
            info!("No DATABASE_URL set, using in-memory store");
            if config.seed_sample {
                Arc::new(MemoryStore::with_sample())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
        Backend::Sqlite(url) => Arc::new(
            SqliteStore::connect(&url)
                .await
                .context("Failed to open SQLite database")?,
        ),
        Backend::Postgres(url) => Arc::new(
            PostgresStore::connect(&url)
                .await
                .context("Failed to connect to PostgreSQL")?,
        ),
    };

    Ok(store)
}

pub(crate) fn db_error(e: sqlx::Error) -> ShipmentError {
    ShipmentError::Database(e.to_string())
}

// Helper struct for sqlx query_as, shared by both SQL dialects
#[derive(sqlx::FromRow)]
pub(crate) struct ShipmentRow {
    id: i64,
    nama: String,
    pengirim: String,
    nama_penerima: String,
    alamat_penerima: String,
    nama_item: String,
    berat_item: i64,
    timestamp: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<ShipmentRow> for Shipment {
    fn from(r: ShipmentRow) -> Self {
        Shipment {
            id: r.id,
            nama: r.nama,
            pengirim: r.pengirim,
            nama_penerima: r.nama_penerima,
            alamat_penerima: r.alamat_penerima,
            nama_item: r.nama_item,
            berat_item: r.berat_item,
            datetime: r.timestamp,
            created_at: r.created_at,
        }
    }
}

/// Behaviour every `ShipmentStore` must share, run against each backend
#[cfg(test)]
pub(crate) mod conformance {
    use chrono::{TimeZone, Utc};
    use shipment_core::{ShipmentError, ShipmentPayload, ShipmentStore};

    const MISSING_ID: i64 = 999_999_999;

    pub fn payload(nama: &str) -> ShipmentPayload {
        ShipmentPayload::new(nama, "Budi", "Sari", "Jl. Merdeka 1", "buku", 3)
    }

    pub async fn run_all(store: &dyn ShipmentStore) {
        round_trip(store).await;
        ids_strictly_increase(store).await;
        update_replaces_fields(store).await;
        update_is_idempotent(store).await;
        missing_ids(store).await;
        delete_removes(store).await;
    }

    async fn round_trip(store: &dyn ShipmentStore) {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let created = store.create(payload("round").with_datetime(at)).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.datetime, at);
        assert!(created.created_at.timestamp() > 0);

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.nama, "round");
        assert_eq!(fetched.pengirim, "Budi");
        assert_eq!(fetched.nama_penerima, "Sari");
        assert_eq!(fetched.alamat_penerima, "Jl. Merdeka 1");
        assert_eq!(fetched.nama_item, "buku");
        assert_eq!(fetched.berat_item, 3);

        let defaulted = store.create(payload("no-time")).await.unwrap();
        assert!(defaulted.datetime.timestamp() > 0);
    }

    async fn ids_strictly_increase(store: &dyn ShipmentStore) {
        let before = store.list().await.unwrap();
        let mut last = before.iter().map(|s| s.id).max().unwrap_or(0);

        for i in 0..3 {
            let created = store.create(payload(&format!("seq-{}", i))).await.unwrap();
            assert!(created.id > last, "{} <= {}", created.id, last);
            last = created.id;
        }

        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "not ascending: {:?}", ids);
    }

    async fn update_replaces_fields(store: &dyn ShipmentStore) {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let created = store.create(payload("before").with_datetime(at)).await.unwrap();

        let changes = ShipmentPayload::new("after", "Ani", "Dewi", "Jl. Sudirman 9", "sepatu", 0);
        let updated = store.update(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.datetime, at);
        assert_eq!(updated.nama, "after");
        assert_eq!(updated.nama_item, "sepatu");
        assert_eq!(updated.berat_item, 0);

        let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let retimed = store
            .update(created.id, payload("after").with_datetime(later))
            .await
            .unwrap();
        assert_eq!(retimed.datetime, later);
        assert_eq!(store.get(created.id).await.unwrap().unwrap(), retimed);
    }

    async fn update_is_idempotent(store: &dyn ShipmentStore) {
        let created = store.create(payload("idem")).await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 8, 17, 0, 0, 0).unwrap();

        let first = store
            .update(created.id, payload("idem-2").with_datetime(at))
            .await
            .unwrap();
        let second = store
            .update(created.id, payload("idem-2").with_datetime(at))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get(created.id).await.unwrap().unwrap(), second);
    }

    async fn missing_ids(store: &dyn ShipmentStore) {
        assert!(store.get(MISSING_ID).await.unwrap().is_none());
        assert!(!store.delete(MISSING_ID).await.unwrap());

        let err = store.update(MISSING_ID, payload("ghost")).await.unwrap_err();
        assert!(matches!(err, ShipmentError::NotFound(id) if id == MISSING_ID));
    }

    async fn delete_removes(store: &dyn ShipmentStore) {
        let created = store.create(payload("doomed")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store
            .list()
            .await
            .unwrap()
            .iter()
            .all(|s| s.id != created.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(Backend::from_url(None).unwrap(), Backend::Memory);
        assert_eq!(Backend::from_url(Some("")).unwrap(), Backend::Memory);
        assert_eq!(Backend::from_url(Some("  ")).unwrap(), Backend::Memory);
        assert_eq!(
            Backend::from_url(Some("postgres://u:p@localhost/ship")).unwrap(),
            Backend::Postgres("postgres://u:p@localhost/ship".to_string())
        );
        assert_eq!(
            Backend::from_url(Some("postgresql://localhost/ship")).unwrap(),
            Backend::Postgres("postgresql://localhost/ship".to_string())
        );
        assert_eq!(
            Backend::from_url(Some("sqlite::memory:")).unwrap(),
            Backend::Sqlite("sqlite::memory:".to_string())
        );
    }

    #[test]
    fn test_backend_rejects_unknown_scheme() {
        let err = Backend::from_url(Some("mysql://localhost/ship")).unwrap_err();
        assert!(matches!(err, ShipmentError::Config(_)));
        assert!(err.to_string().contains("mysql"));
    }

    #[tokio::test]
    async fn test_open_memory_respects_seed_flag() {
        let config = ServerConfig {
            seed_sample: false,
            ..ServerConfig::default()
        };
        let store = open(&config).await.unwrap();
        assert_eq!(store.backend(), "memory");
        assert!(store.list().await.unwrap().is_empty());

        let config = ServerConfig {
            seed_sample: true,
            ..ServerConfig::default()
        };
        let store = open(&config).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_unreachable_database_fails() {
        let config = ServerConfig {
            database_url: Some("sqlite:///nonexistent-dir/for/sure/ship.db".to_string()),
            ..ServerConfig::default()
        };
        assert!(open(&config).await.is_err());
    }
}
