//! Filesystem helpers for output directories and config files.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{KtError, Result};

/// Create the output directory and any missing parents.
///
/// Failures are reported as [`KtError::WriteOutput`] against `dir`.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| KtError::WriteOutput {
        path: dir.to_path_buf(),
        source,
    })
}

/// Read a config file. A missing file is `Ok(None)`.
pub fn read_config_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(KtError::Config(format!(
            "read config {}: {err}",
            path.display()
        ))),
    }
}
