//! In-memory shipment store (used when no DATABASE_URL is configured)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shipment_core::{Result, Shipment, ShipmentError, ShipmentPayload, ShipmentStore};
use tokio::sync::RwLock;

/// Ordered shipment collection behind a single reader/writer lock.
///
/// The lock covers both the records and the id counter, so concurrent
/// creates always receive distinct, increasing ids.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    shipments: Vec<Shipment>,
    next_id: i64,
}

impl MemoryStore {
    /// Empty store; the first shipment gets id 1
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                shipments: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store pre-populated with one sample shipment (id 1)
    pub fn with_sample() -> Self {
        let now = Utc::now();
        let sample = Shipment {
            id: 1,
            nama: "Halim".to_string(),
            pengirim: "Judy".to_string(),
            nama_penerima: "Jasonn".to_string(),
            alamat_penerima: "Jalan agust 11,jakarta".to_string(),
            nama_item: "baju".to_string(),
            berat_item: 90,
            datetime: now,
            created_at: now,
        };

        Self {
            inner: RwLock::new(Inner {
                shipments: vec![sample],
                next_id: 2,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn build(
    id: i64,
    payload: ShipmentPayload,
    datetime: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> Shipment {
    Shipment {
        id,
        nama: payload.nama,
        pengirim: payload.pengirim,
        nama_penerima: payload.nama_penerima,
        alamat_penerima: payload.alamat_penerima,
        nama_item: payload.nama_item,
        berat_item: payload.berat_item,
        datetime,
        created_at,
    }
}

#[async_trait]
impl ShipmentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Shipment>> {
        let inner = self.inner.read().await;
        Ok(inner.shipments.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Shipment>> {
        let inner = self.inner.read().await;
        Ok(inner.shipments.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, payload: ShipmentPayload) -> Result<Shipment> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let datetime = payload.datetime.unwrap_or(now);
        let shipment = build(id, payload, datetime, now);
        inner.shipments.push(shipment.clone());

        Ok(shipment)
    }

    async fn update(&self, id: i64, payload: ShipmentPayload) -> Result<Shipment> {
        let mut inner = self.inner.write().await;

        let slot = inner
            .shipments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ShipmentError::NotFound(id))?;

        let datetime = payload.datetime.unwrap_or(slot.datetime);
        *slot = build(id, payload, datetime, slot.created_at);

        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;

        match inner.shipments.iter().position(|s| s.id == id) {
            Some(idx) => {
                // `remove` keeps the remaining records in id order
                inner.shipments.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
