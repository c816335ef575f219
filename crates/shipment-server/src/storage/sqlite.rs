//! SQLite shipment store

use anyhow::{Context, Result};
use async_trait::async_trait;
use shipment_core::{Shipment, ShipmentError, ShipmentPayload, ShipmentStore};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

use super::{db_error, ShipmentRow};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", url);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid SQLite URL: {}", url))?
            .create_if_missing(true);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        // An in-memory database lives only as long as its connection, so the
        // pool must hold exactly one and never recycle it.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", url))?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shipments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nama TEXT NOT NULL,
                pengirim TEXT NOT NULL,
                nama_penerima TEXT NOT NULL,
                alamat_penerima TEXT NOT NULL,
                nama_item TEXT NOT NULL,
                berat_item INTEGER NOT NULL CHECK (berat_item >= 0),
                "timestamp" TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ShipmentStore for SqliteStore {
    async fn list(&self) -> shipment_core::Result<Vec<Shipment>> {
        let rows: Vec<ShipmentRow> = sqlx::query_as(
            r#"
            SELECT id, nama, pengirim, nama_penerima, alamat_penerima,
                   nama_item, berat_item, "timestamp", created_at
            FROM shipments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get(&self, id: i64) -> shipment_core::Result<Option<Shipment>> {
        let row: Option<ShipmentRow> = sqlx::query_as(
            r#"
            SELECT id, nama, pengirim, nama_penerima, alamat_penerima,
                   nama_item, berat_item, "timestamp", created_at
            FROM shipments WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, payload: ShipmentPayload) -> shipment_core::Result<Shipment> {
        let row: ShipmentRow = sqlx::query_as(
            r#"
            INSERT INTO shipments
                (nama, pengirim, nama_penerima, alamat_penerima, nama_item, berat_item, "timestamp")
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, COALESCE(?7, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))
            RETURNING id, nama, pengirim, nama_penerima, alamat_penerima,
                      nama_item, berat_item, "timestamp", created_at
            "#,
        )
        .bind(&payload.nama)
        .bind(&payload.pengirim)
        .bind(&payload.nama_penerima)
        .bind(&payload.alamat_penerima)
        .bind(&payload.nama_item)
        .bind(payload.berat_item)
        .bind(payload.datetime)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, payload: ShipmentPayload) -> shipment_core::Result<Shipment> {
        let row: Option<ShipmentRow> = sqlx::query_as(
            r#"
            UPDATE shipments
            SET nama = ?1, pengirim = ?2, nama_penerima = ?3, alamat_penerima = ?4,
                nama_item = ?5, berat_item = ?6, "timestamp" = COALESCE(?7, "timestamp")
            WHERE id = ?8
            RETURNING id, nama, pengirim, nama_penerima, alamat_penerima,
                      nama_item, berat_item, "timestamp", created_at
            "#,
        )
        .bind(&payload.nama)
        .bind(&payload.pengirim)
        .bind(&payload.nama_penerima)
        .bind(&payload.alamat_penerima)
        .bind(&payload.nama_item)
        .bind(payload.berat_item)
        .bind(payload.datetime)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(|r| r.into()).ok_or(ShipmentError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> shipment_core::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM shipments WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() == 1)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
