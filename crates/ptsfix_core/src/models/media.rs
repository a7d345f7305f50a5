//! Probe record: the validated timing view of one media file.

use serde::{Deserialize, Serialize};

use super::enums::StreamKind;

/// Timing-relevant properties of a single stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream kind (video, audio, other).
    pub kind: StreamKind,
    /// Audio channel count (0 for non-audio streams).
    pub channel_count: u32,
    /// First presentation timestamp in seconds.
    pub start_time: f64,
}

impl StreamInfo {
    /// Create a new stream description.
    pub fn new(kind: StreamKind, channel_count: u32, start_time: f64) -> Self {
        Self {
            kind,
            channel_count,
            start_time,
        }
    }

    pub fn video(start_time: f64) -> Self {
        Self::new(StreamKind::Video, 0, start_time)
    }

    pub fn audio(channel_count: u32, start_time: f64) -> Self {
        Self::new(StreamKind::Audio, channel_count, start_time)
    }
}

/// Container and per-stream start times for one media file.
///
/// Built once by [`crate::probe::normalize`] and never mutated afterwards.
/// Streams keep the probe's order: index 0 is the first stream reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    file_name: String,
    container_start_time: f64,
    streams: Vec<StreamInfo>,
}

impl ProbeRecord {
    /// Create a record from already-parsed values.
    pub fn new(
        file_name: impl Into<String>,
        container_start_time: f64,
        streams: Vec<StreamInfo>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            container_start_time,
            streams,
        }
    }

    /// Filename reported by the probe for the container.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Container-level start time in seconds.
    pub fn container_start_time(&self) -> f64 {
        self.container_start_time
    }

    /// Streams in probe order.
    pub fn streams(&self) -> &[StreamInfo] {
        &self.streams
    }

    /// Start times of all streams, in probe order.
    pub fn stream_start_times(&self) -> Vec<f64> {
        self.streams.iter().map(|s| s.start_time).collect()
    }

    /// True if the container or any stream starts after zero.
    pub fn has_non_zero_timing(&self) -> bool {
        self.container_start_time > 0.0 || self.streams.iter().any(|s| s.start_time > 0.0)
    }
}
