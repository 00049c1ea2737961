//! Common platform utilities

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents as string, trimming whitespace
pub fn read_file_string<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}

/// Read a sysfs value in millidegrees Celsius and convert to degrees
pub fn read_millidegrees<P: AsRef<Path>>(path: P) -> Result<f32> {
    let content = read_file_string(path)?;
    content
        .parse::<i64>()
        .map(|mc| mc as f32 / 1000.0)
        .map_err(|e| Error::Parse(format!("Failed to parse millidegrees '{}': {}", content, e)))
}
