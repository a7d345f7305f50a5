//! Raw probe output as produced by ffprobe's JSON writer.

use serde::{Deserialize, Serialize};

/// Top-level ffprobe document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProbe {
    #[serde(default)]
    pub format: RawFormat,
    #[serde(default)]
    pub streams: Vec<RawStream>,
}

/// The `format` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFormat {
    /// Input name as ffprobe opened it (path or URL).
    #[serde(default)]
    pub filename: Option<String>,
    /// Container start time, decimal seconds as a string.
    #[serde(default)]
    pub start_time: Option<String>,
}

/// One entry of the `streams` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStream {
    /// "video", "audio", "subtitle", "data", ...
    #[serde(default)]
    pub codec_type: String,
    /// Only present on audio streams.
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub start_time: Option<String>,
}

impl RawProbe {
    /// Parse ffprobe JSON output.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
