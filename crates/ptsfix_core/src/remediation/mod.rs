//! Remediation: turning a [`crate::skew::RemediationPlan`] into an ffmpeg run.
//!
//! - **Args**: pure construction of the ffmpeg argument list
//! - **Runner**: the [`Remediator`] seam and its ffmpeg implementation

mod args;
mod runner;

pub use args::{format_command_line, FfmpegArgsBuilder};
pub use runner::{FfmpegCli, Remediator};
