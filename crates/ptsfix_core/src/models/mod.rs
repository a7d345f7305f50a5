//! Data models for ptsfix.
//!
//! - Stream kinds as reported by the probe
//! - The validated, immutable probe record consumed by the classifier

mod enums;
mod media;

pub use enums::StreamKind;
pub use media::{ProbeRecord, StreamInfo};
