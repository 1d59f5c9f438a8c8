//! # YAML Availability Repository
//!
//! File-based storage for vendor weekly availability, one YAML file per
//! vendor stored at `{vendor_id}/availability.yaml`.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── {vendor_id}/
//!     └── availability.yaml    ← This module manages these files
//! ```
//!
//! ## YAML Format
//!
//! ```yaml
//! vendor_id: corner-bakery
//! schedule:
//!   mon:
//!     available: true
//!     pickup_start: "17:00"
//!     pickup_end: "18:00"
//!     default_quantity: 6
//! created_at: "2025-01-21T19:30:00+00:00"
//! updated_at: "2025-01-21T19:35:00+00:00"
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::connection::YamlConnection;
use crate::domain::models::availability::{validate_vendor_id, VendorAvailability};
use crate::storage::AvailabilityStorage;

const AVAILABILITY_FILE: &str = "availability.yaml";

#[derive(Clone, Debug)]
pub struct YamlAvailabilityRepository {
    connection: YamlConnection,
}

impl YamlAvailabilityRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn availability_path(&self, vendor_id: &str) -> Result<PathBuf> {
        validate_vendor_id(vendor_id)?;
        Ok(self
            .connection
            .vendor_directory(vendor_id)
            .join(AVAILABILITY_FILE))
    }

    fn load_from_path(&self, path: &Path) -> Result<VendorAvailability> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let availability: VendorAvailability = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(availability)
    }
}

#[async_trait]
impl AvailabilityStorage for YamlAvailabilityRepository {
    async fn store_availability(&self, availability: &VendorAvailability) -> Result<()> {
        let path = self.availability_path(&availability.vendor_id)?;
        let yaml_content = serde_yaml::to_string(availability)?;

        self.connection.write_atomic(&path, &yaml_content)?;

        debug!(
            "Saved availability for vendor '{}' to {:?}",
            availability.vendor_id, path
        );
        Ok(())
    }

    async fn get_availability(&self, vendor_id: &str) -> Result<Option<VendorAvailability>> {
        let path = self.availability_path(vendor_id)?;

        if !path.exists() {
            debug!("No availability file for vendor '{}'", vendor_id);
            return Ok(None);
        }

        self.load_from_path(&path).map(Some)
    }

    async fn delete_availability(&self, vendor_id: &str) -> Result<bool> {
        let path = self.availability_path(vendor_id)?;

        if path.exists() {
            fs::remove_file(&path)?;
            info!("Deleted availability for vendor '{}' from {:?}", vendor_id, path);
            Ok(true)
        } else {
            debug!("No availability found to delete for vendor '{}'", vendor_id);
            Ok(false)
        }
    }

    async fn list_availabilities(&self) -> Result<Vec<VendorAvailability>> {
        let base_dir = self.connection.base_directory();
        let mut availabilities = Vec::new();

        if !base_dir.exists() {
            return Ok(availabilities);
        }

        for entry in fs::read_dir(base_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            let file_path = path.join(AVAILABILITY_FILE);
            if !file_path.exists() {
                continue;
            }

            match self.load_from_path(&file_path) {
                Ok(availability) => availabilities.push(availability),
                Err(e) => warn!("Skipping unreadable availability file {:?}: {:#}", file_path, e),
            }
        }

        availabilities.sort_by(|a, b| a.vendor_id.cmp(&b.vendor_id));
        Ok(availabilities)
    }
}
