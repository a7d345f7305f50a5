//! Start-time skew detection and remediation planning.
//!
//! A file whose container or streams start after zero is "skewed". Exactly
//! one skew pattern is remediable:
//!
//! ```text
//! stream 0  video  start = 0.000
//! stream 1  audio  start = 0.500  (stereo)
//!           └──────┘ silent gap, pad 500 ms at the head of the audio
//! ```
//!
//! Everything else with non-zero timing is reported as unhandled.

mod classifier;
mod planner;

pub use classifier::classify;
pub use planner::{output_base_name, plan, OUTPUT_EXTENSION, OUTPUT_SUFFIX};

use serde::{Deserialize, Serialize};

/// Parameters of the remediable "video leads audio" pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilentGap {
    /// Seconds of silence to insert before the audio.
    pub delay_seconds: f64,
    /// Channel count of the audio stream; every channel gets the same delay.
    pub audio_channels: u32,
}

/// Outcome of classifying a probe record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkewClassification {
    /// Container and all streams start at (or before) zero.
    Aligned,
    /// Video starts at zero, stereo audio starts late.
    VideoLeadsAudioBySilentGap(SilentGap),
    /// Non-zero timing that no rule knows how to fix.
    Unhandled,
}

impl SkewClassification {
    /// Build the remediation plan if this classification has one.
    pub fn remediation(&self, source_file_name: &str) -> Option<RemediationPlan> {
        match self {
            SkewClassification::VideoLeadsAudioBySilentGap(gap) => {
                Some(plan(gap, source_file_name))
            }
            SkewClassification::Aligned | SkewClassification::Unhandled => None,
        }
    }

    /// Short label for reporting.
    pub fn label(&self) -> &'static str {
        match self {
            SkewClassification::Aligned => "aligned",
            SkewClassification::VideoLeadsAudioBySilentGap(_) => "video leads audio",
            SkewClassification::Unhandled => "unhandled",
        }
    }
}

/// A concrete, tool-independent remediation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationPlan {
    /// Seconds of silence to insert at the head of the audio.
    pub delay_seconds: f64,
    /// Output file name (no directory), e.g. `clip_ptsfix.mp4`.
    pub output_base_name: String,
    /// Number of audio channels to delay.
    pub audio_channels: u32,
}

impl RemediationPlan {
    /// Delay in milliseconds, as audio filters expect it.
    pub fn delay_ms(&self) -> f64 {
        self.delay_seconds * 1000.0
    }
}
