//! Shipment types

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero time some clients send
/// in place of leaving the field out.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// A stored shipment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: i64,
    pub nama: String,
    pub pengirim: String,
    pub nama_penerima: String,
    pub alamat_penerima: String,
    pub nama_item: String,
    pub berat_item: i64,
    /// Event time supplied by the client (or assigned on create)
    pub datetime: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request body for create and update.
///
/// Missing string fields decode as empty so that validation can name the
/// offending field. `id` and `createdAt` are accepted but ignored, since the
/// store owns both. A zero `datetime` (`0001-01-01T00:00:00Z`) decodes as
/// not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShipmentPayload {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub pengirim: String,
    #[serde(default)]
    pub nama_penerima: String,
    #[serde(default)]
    pub alamat_penerima: String,
    #[serde(default)]
    pub nama_item: String,
    #[serde(default)]
    pub berat_item: i64,
    #[serde(default, deserialize_with = "event_time")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
    #[serde(default, rename = "createdAt")]
    _created_at: Option<IgnoredAny>,
}

impl ShipmentPayload {
    pub fn new(
        nama: impl Into<String>,
        pengirim: impl Into<String>,
        nama_penerima: impl Into<String>,
        alamat_penerima: impl Into<String>,
        nama_item: impl Into<String>,
        berat_item: i64,
    ) -> Self {
        Self {
            nama: nama.into(),
            pengirim: pengirim.into(),
            nama_penerima: nama_penerima.into(),
            alamat_penerima: alamat_penerima.into(),
            nama_item: nama_item.into(),
            berat_item,
            ..Default::default()
        }
    }

    /// Set the client-supplied event time
    pub fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = Some(datetime);
        self
    }
}

fn event_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|t| t.timestamp() != ZERO_TIME_SECS || t.timestamp_subsec_nanos() != 0))
}

/// Response body for a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedShipment {
    pub deleted_id: i64,
}
