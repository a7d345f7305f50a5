//! Media probing.
//!
//! - **Raw output**: serde mirror of `ffprobe -show_format -show_streams` JSON
//! - **Prober**: the [`MediaProber`] seam and its ffprobe implementation
//! - **Normalization**: raw output → validated [`crate::models::ProbeRecord`]
//!
//! ffprobe reports start times as decimal strings (`"0.000000"`). They stay
//! strings in [`RawProbe`] so that normalization can reject anything that is
//! not a number instead of silently treating it as zero.

mod ffprobe;
mod normalize;
mod types;

pub use ffprobe::{FfprobeCli, MediaProber};
pub use normalize::normalize;
pub use types::{RawFormat, RawProbe, RawStream};
