//! # Application Configuration
//!
//! Settings are resolved once at start-up, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. a YAML file: `$SURPLUS_MARKET_CONFIG`, or `./surplus_market.yaml` when present
//! 3. environment overrides (`SURPLUS_MARKET_HOST`, `SURPLUS_MARKET_PORT`,
//!    `SURPLUS_MARKET_DATA_DIR`, `SURPLUS_MARKET_STORAGE`)
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 3000
//! storage: yaml
//! data_directory: /var/lib/surplus-market
//! impact:
//!   money_saved_per_bag: 2.89
//!   co2e_saved_per_bag_kg: 2.7
//!   hours_of_showers_per_kg_co2e: 2.5
//!   slider_min: -5
//!   slider_max: 20
//!   currency: USD
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shared::ImpactConfig;
use std::collections::HashMap;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "SURPLUS_MARKET_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "surplus_market.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One YAML file per vendor under `data_directory`
    Yaml,
    /// Process-local, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" => Ok(StorageBackend::Yaml),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend '{}'. Expected 'yaml' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origin, or "*" for any
    pub cors_origin: String,
    pub storage: StorageBackend,
    /// Defaults to the platform data directory
    pub data_directory: Option<PathBuf>,
    /// Seed the in-memory store with demo vendors
    pub seed_demo_data: bool,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
    pub impact: ImpactConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
            storage: StorageBackend::Yaml,
            data_directory: None,
            seed_demo_data: false,
            log_filter: "info".to_string(),
            impact: ImpactConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from file and process environment, then validate
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(&vars)
    }

    /// Load using an explicit set of environment variables
    pub fn load_from(vars: &HashMap<String, String>) -> Result<Self> {
        let explicit_path = vars.get(CONFIG_PATH_VAR).map(PathBuf::from);

        let mut config = match explicit_path {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(host) = vars.get("SURPLUS_MARKET_HOST") {
            self.host = host
                .parse()
                .with_context(|| format!("Invalid SURPLUS_MARKET_HOST '{}'", host))?;
        }
        if let Some(port) = vars.get("SURPLUS_MARKET_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid SURPLUS_MARKET_PORT '{}'", port))?;
        }
        if let Some(dir) = vars.get("SURPLUS_MARKET_DATA_DIR") {
            self.data_directory = Some(PathBuf::from(dir));
        }
        if let Some(storage) = vars.get("SURPLUS_MARKET_STORAGE") {
            self.storage = storage.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let impact = &self.impact;
        let factors = [
            ("money_saved_per_bag", impact.money_saved_per_bag),
            ("co2e_saved_per_bag_kg", impact.co2e_saved_per_bag_kg),
            ("hours_of_showers_per_kg_co2e", impact.hours_of_showers_per_kg_co2e),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                bail!("impact.{} must be a positive number, got {}", name, value);
            }
        }
        if impact.slider_min > impact.slider_max {
            bail!(
                "impact.slider_min ({}) must not exceed impact.slider_max ({})",
                impact.slider_min,
                impact.slider_max
            );
        }
        if impact.currency.trim().len() != 3 {
            bail!("impact.currency must be a 3-letter ISO 4217 code, got '{}'", impact.currency);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Configured data directory, or `{platform data dir}/surplus-market`
    pub fn resolved_data_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_directory {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("surplus-market"))
            .context("Could not determine a data directory; set SURPLUS_MARKET_DATA_DIR")
    }
}
