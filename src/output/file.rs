//! Result file persistence.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::scanner::{ObserverError, ScanObserver, ScanResult};

use super::OutputError;

/// Current result file format version.
pub const RESULT_FILE_VERSION: u32 = 1;

/// On-disk layout of the result file.
#[derive(Debug, Serialize)]
pub struct ResultFile<'a> {
    /// Format version for compatibility checking.
    pub version: u32,
    /// Unix timestamp (seconds) of the write.
    pub saved_at: String,
    /// The scan result.
    pub interfaces: &'a ScanResult,
}

impl<'a> ResultFile<'a> {
    fn new(interfaces: &'a ScanResult) -> Self {
        Self {
            version: RESULT_FILE_VERSION,
            saved_at: unix_timestamp_now(),
            interfaces,
        }
    }
}

fn unix_timestamp_now() -> String {
    let elapsed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    elapsed.as_secs().to_string()
}

/// Observer that keeps the latest scan result in a JSON file.
///
/// Writes go to `{path}.tmp` first and are then renamed over `path`, so
/// readers never see a partial file. Missing parent directories are
/// created.
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `result` to the file, replacing the previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn write(&self, result: &ScanResult) -> Result<(), OutputError> {
        let content = serde_json::to_string_pretty(&ResultFile::new(result))
            .map_err(OutputError::Serialize)?;

        let io_error = |source| OutputError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        // result.json -> result.json.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        std::fs::write(&temp_path, content).map_err(io_error)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = std::fs::remove_file(&temp_path) {
                tracing::warn!(
                    "Failed to remove {}: {cleanup}",
                    temp_path.display()
                );
            }
            return Err(io_error(e));
        }

        tracing::debug!(
            "Wrote {} interface(s) to {}",
            result.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl ScanObserver for JsonFileWriter {
    fn notify(&self, result: &ScanResult) -> Result<(), ObserverError> {
        self.write(result)
            .map_err(|e| ObserverError::new(e.to_string()))
    }
}
