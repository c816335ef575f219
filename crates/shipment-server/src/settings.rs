//! Server configuration, read from environment variables

use config::{Config, Environment};
use serde::Deserialize;
use shipment_core::{Result, ShipmentError};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// `DATABASE_URL`; unset or empty selects the in-memory store
    #[serde(default)]
    pub database_url: Option<String>,
    /// `PORT`
    pub port: u16,
    /// `BIND_HOST`
    pub bind_host: String,
    /// `SEED_SAMPLE`: start the in-memory store with one sample shipment
    pub seed_sample: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 8080,
            bind_host: "0.0.0.0".to_string(),
            seed_sample: true,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default())
    }

    fn load(source: Environment) -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("port", i64::from(defaults.port))
            .and_then(|b| b.set_default("bind_host", defaults.bind_host))
            .and_then(|b| b.set_default("seed_sample", defaults.seed_sample))
            .map_err(|e| ShipmentError::Config(e.to_string()))?
            .add_source(source.try_parsing(true))
            .build()
            .map_err(|e| ShipmentError::Config(e.to_string()))?;

        let mut config: ServerConfig = settings
            .try_deserialize()
            .map_err(|e| ShipmentError::Config(e.to_string()))?;

        config.database_url = config
            .database_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(config)
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
