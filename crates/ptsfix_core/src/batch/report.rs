//! Per-entry outcomes and the run summary.

use std::path::PathBuf;

use serde::Serialize;

use crate::skew::RemediationPlan;

/// What happened to one manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// No start-time skew.
    Aligned,
    /// Remediation planned; `executed` is false in dry-run mode.
    Corrected {
        plan: RemediationPlan,
        output_path: PathBuf,
        executed: bool,
    },
    /// Skewed, but no rule applies.
    Unhandled {
        container_start: f64,
        stream_starts: Vec<f64>,
    },
    /// Probe, validation or remediation failed.
    Failed { error: String },
}

impl EntryOutcome {
    /// One-line description for the console.
    pub fn describe(&self) -> String {
        match self {
            EntryOutcome::Aligned => "aligned".to_string(),
            EntryOutcome::Corrected {
                plan,
                output_path,
                executed,
            } => format!(
                "{}: audio delayed by {}s -> {}",
                if *executed { "corrected" } else { "would correct" },
                plan.delay_seconds,
                output_path.display()
            ),
            EntryOutcome::Unhandled {
                container_start,
                stream_starts,
            } => format!(
                "unhandled: container start {}, stream starts {:?}",
                container_start, stream_starts
            ),
            EntryOutcome::Failed { error } => format!("failed: {}", error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, EntryOutcome::Failed { .. })
    }
}

/// Outcome of one entry with its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    /// 1-based position in the manifest.
    pub index: usize,
    pub id: String,
    pub location: String,
    pub outcome: EntryOutcome,
}

/// Results of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub entries: Vec<EntryReport>,
}

impl BatchSummary {
    pub fn push(&mut self, report: EntryReport) {
        self.entries.push(report);
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn aligned(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Aligned))
    }

    pub fn corrected(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Corrected { .. }))
    }

    pub fn unhandled(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Unhandled { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(EntryOutcome::is_failure)
    }

    /// True if no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Summary line for the end of a run.
    pub fn describe(&self) -> String {
        format!(
            "{} entries: {} aligned, {} corrected, {} unhandled, {} failed",
            self.total(),
            self.aligned(),
            self.corrected(),
            self.unhandled(),
            self.failed()
        )
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(index: usize, outcome: EntryOutcome) -> EntryReport {
        EntryReport {
            index,
            id: format!("{:032x}", index),
            location: format!("file{}.mov", index),
            outcome,
        }
    }

    #[test]
    fn counts_outcomes() {
        let mut summary = BatchSummary::default();
        summary.push(report(1, EntryOutcome::Aligned));
        summary.push(report(
            2,
            EntryOutcome::Unhandled {
                container_start: 0.0,
                stream_starts: vec![0.1, 0.0],
            },
        ));
        summary.push(report(
            3,
            EntryOutcome::Failed {
                error: "boom".to_string(),
            },
        ));

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.aligned(), 1);
        assert_eq!(summary.unhandled(), 1);
        assert_eq!(summary.corrected(), 0);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_success());
        assert_eq!(
            summary.describe(),
            "3 entries: 1 aligned, 0 corrected, 1 unhandled, 1 failed"
        );
    }

    #[test]
    fn describes_correction() {
        let outcome = EntryOutcome::Corrected {
            plan: RemediationPlan {
                delay_seconds: 0.5,
                output_base_name: "clip_ptsfix.mp4".to_string(),
                audio_channels: 2,
            },
            output_path: PathBuf::from("clip_ptsfix.mp4"),
            executed: true,
        };
        assert_eq!(
            outcome.describe(),
            "corrected: audio delayed by 0.5s -> clip_ptsfix.mp4"
        );
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(&EntryOutcome::Aligned).unwrap();
        assert_eq!(json["status"], "aligned");
    }
}
