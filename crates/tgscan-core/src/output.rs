//! JSON persistence for [`ScanResult`].
//!
//! The file is rewritten whole on every save. There is no temp-file swap;
//! a crash mid-write can leave a truncated file until the next save.

use std::path::Path;

use thiserror::Error;

use crate::records::ScanResult;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write scan result to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode scan result: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode scan result from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize `result` as pretty JSON and overwrite `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns [`OutputError::Encode`] if serialization fails or
/// [`OutputError::Io`] if the directory or file cannot be written.
pub fn write_scan_result(path: &Path, result: &ScanResult) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut body = serde_json::to_string_pretty(result).map_err(OutputError::Encode)?;
    body.push('\n');
    std::fs::write(path, body).map_err(io_err)
}

/// Read a previously written scan file.
///
/// # Errors
///
/// Returns [`OutputError::Io`] if the file cannot be read or
/// [`OutputError::Decode`] if it is not a valid scan document.
pub fn read_scan_result(path: &Path) -> Result<ScanResult, OutputError> {
    let content = std::fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| OutputError::Decode {
        path: path.display().to_string(),
        source,
    })
}
