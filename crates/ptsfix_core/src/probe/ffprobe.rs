//! File probing using ffprobe.

use std::process::Command;

use crate::errors::{EntryError, EntryResult};

use super::types::RawProbe;

/// Source of raw probe metadata for a media location.
///
/// The batch runner depends on this trait rather than on ffprobe directly,
/// so tests can feed canned probe output.
pub trait MediaProber {
    /// Probe a file path or URL.
    fn probe(&self, location: &str) -> EntryResult<RawProbe>;
}

/// [`MediaProber`] backed by the `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct FfprobeCli {
    binary: String,
}

impl FfprobeCli {
    /// Create a prober that runs the given ffprobe binary.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments passed to ffprobe for a location.
    pub fn args(location: &str) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-show_format".to_string(),
            "-show_streams".to_string(),
            location.to_string(),
        ]
    }
}

impl Default for FfprobeCli {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MediaProber for FfprobeCli {
    fn probe(&self, location: &str) -> EntryResult<RawProbe> {
        tracing::debug!("Probing: {}", location);

        let output = Command::new(&self.binary)
            .args(Self::args(location))
            .output()
            .map_err(|e| {
                EntryError::probe_failed(location, format!("Failed to run {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EntryError::probe_failed(
                location,
                format!(
                    "{} exited with code {}: {}",
                    self.binary,
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        RawProbe::from_json(&output.stdout).map_err(|e| {
            EntryError::probe_failed(location, format!("Invalid {} output: {}", self.binary, e))
        })
    }
}
