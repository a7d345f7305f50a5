//! Remediation planner: silent gap + source name → [`RemediationPlan`].

use super::{RemediationPlan, SilentGap};

/// Marker appended to the source stem.
pub const OUTPUT_SUFFIX: &str = "_ptsfix";

/// Container extension of remediated files.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Build the remediation plan for a silent gap. Pure and deterministic.
pub fn plan(gap: &SilentGap, source_file_name: &str) -> RemediationPlan {
    RemediationPlan {
        delay_seconds: gap.delay_seconds,
        output_base_name: output_base_name(source_file_name),
        audio_channels: gap.audio_channels,
    }
}

/// Derive the output file name from a source path or URL.
///
/// Takes the last component (splitting on both `/` and `\`, ignoring trailing
/// separators), drops its final extension and appends [`OUTPUT_SUFFIX`] and
/// [`OUTPUT_EXTENSION`].
pub fn output_base_name(source_file_name: &str) -> String {
    let trimmed = source_file_name.trim_end_matches(['/', '\\']);
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);

    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };

    format!("{}{}.{}", stem, OUTPUT_SUFFIX, OUTPUT_EXTENSION)
}
