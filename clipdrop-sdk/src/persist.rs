// ABOUTME: Writes response payloads to the output path
// ABOUTME: Keeps open failures (nothing written) apart from write failures (partial file)

use crate::error::ClipdropError;
use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Creates or truncates `path` and writes all of `bytes` to it.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| ClipdropError::FileOpen {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let write_failed = |e: std::io::Error| ClipdropError::FileWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    file.write_all(bytes).map_err(write_failed)?;
    file.flush().map_err(write_failed)?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
