use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// YamlConnection owns the data directory and hands out per-vendor paths
#[derive(Clone, Debug)]
pub struct YamlConnection {
    base_directory: PathBuf,
}

impl YamlConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one vendor's files
    pub fn vendor_directory(&self, vendor_id: &str) -> PathBuf {
        self.base_directory.join(vendor_id)
    }

    /// Write `contents` to `path` through a uniquely named temp file in the
    /// same directory, then rename it into place. Concurrent writers never
    /// share a temp file, so readers see one complete document or the other.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?;
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        temp_file
            .write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_file.path().display()))?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to move temp file into {}", path.display()))?;
        Ok(())
    }
}
