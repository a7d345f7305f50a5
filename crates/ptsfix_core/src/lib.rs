//! ptsfix core - start-time skew detection and remediation.
//!
//! This crate contains the decision engine and all batch plumbing with no
//! CLI dependencies. The binary in `ptsfix_cli` wires it to real tools.
//!
//! Flow for each manifest entry:
//!
//! ```text
//! ManifestEntry -> MediaProber -> RawProbe -> normalize -> ProbeRecord
//!     -> classify -> SkewClassification -> plan -> RemediationPlan
//!     -> FfmpegArgsBuilder -> Remediator
//! ```

pub mod batch;
pub mod config;
pub mod errors;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod probe;
pub mod remediation;
pub mod skew;

pub use errors::{BatchError, BatchResult, EntryError, EntryResult};
pub use models::{ProbeRecord, StreamInfo, StreamKind};
pub use skew::{classify, plan, RemediationPlan, SilentGap, SkewClassification};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
