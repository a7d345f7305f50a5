//! Manifest parsing.
//!
//! A manifest lists one file per line as `<id>\t<location>`, where `id` is a
//! 32-character lowercase hex identifier and `location` a path or URL. Any
//! line that does not match rejects the whole manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while reading a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest line {line_number} does not match \"ID<TAB>LOCATION\": {line:?}")]
    InvalidLine { line_number: usize, line: String },

    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// 32-character lowercase hex identifier.
    pub id: String,
    /// File path or URL to probe.
    pub location: String,
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([a-z0-9]{32})\t(.+)$").expect("valid manifest regex"))
}

/// Parse a single manifest line. `line_number` is 1-based, for errors.
pub fn parse_line(line: &str, line_number: usize) -> Result<ManifestEntry, ManifestError> {
    let captures = line_pattern()
        .captures(line)
        .ok_or_else(|| ManifestError::InvalidLine {
            line_number,
            line: line.to_string(),
        })?;

    Ok(ManifestEntry {
        id: captures[1].to_string(),
        location: captures[2].to_string(),
    })
}

/// Parse manifest text. Both `\n` and `\r\n` line endings are accepted.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_manifest(&text)?;
    tracing::debug!("Read {} manifest entries from {}", entries.len(), path.display());
    Ok(entries)
}
