//! Core enums used throughout the crate.

use serde::{Deserialize, Serialize};

/// Kind of media stream, as far as skew classification cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    /// Subtitles, data, attachments and anything else.
    Other,
}

impl StreamKind {
    /// Map an ffprobe `codec_type` value to a stream kind.
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            _ => StreamKind::Other,
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
            StreamKind::Other => write!(f, "other"),
        }
    }
}
