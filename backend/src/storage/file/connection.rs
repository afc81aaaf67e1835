use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXPENSES_FILE_NAME: &str = "expenses.json";

/// FileConnection owns the data directory and the file layout inside it
#[derive(Debug, Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {}", base_path.display()))?;
            info!("📁 Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the JSON ledger document
    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(EXPENSES_FILE_NAME)
    }

    /// Write `contents` to `path` via a temp file and rename
    pub fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("moving {} into place", path.display()))?;

        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }
}
