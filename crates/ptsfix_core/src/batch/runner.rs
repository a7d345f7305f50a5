//! Sequential batch runner.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{EncodingSettings, Settings};
use crate::errors::{BatchError, BatchResult, EntryError, EntryResult};
use crate::logging::JobLogger;
use crate::manifest::{read_manifest, ManifestEntry};
use crate::probe::{normalize, MediaProber};
use crate::remediation::{format_command_line, FfmpegArgsBuilder, Remediator};
use crate::skew::{classify, SkewClassification};

use super::report::{BatchSummary, EntryOutcome, EntryReport};

/// Options controlling a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Folder remediated files are written to ("." or empty = cwd).
    pub output_folder: PathBuf,
    /// Audio encoding for remediated files.
    pub encoding: EncodingSettings,
    /// Abort on the first failing entry.
    pub fail_fast: bool,
    /// Plan remediation without running the tool.
    pub dry_run: bool,
}

impl BatchOptions {
    /// Build options from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            output_folder: PathBuf::from(&settings.paths.output_folder),
            encoding: settings.encoding.clone(),
            fail_fast: settings.batch.fail_fast,
            dry_run: settings.batch.dry_run,
        }
    }

    /// Where an output file with this name is written.
    pub fn output_path(&self, base_name: &str) -> PathBuf {
        if self.output_folder.as_os_str().is_empty() || self.output_folder == Path::new(".") {
            PathBuf::from(base_name)
        } else {
            self.output_folder.join(base_name)
        }
    }
}

/// Runs manifest entries through classification and remediation.
pub struct BatchRunner<P, R> {
    prober: P,
    remediator: R,
    options: BatchOptions,
}

impl<P: MediaProber, R: Remediator> BatchRunner<P, R> {
    /// Create a runner with the given collaborators.
    pub fn new(prober: P, remediator: R, options: BatchOptions) -> Self {
        Self {
            prober,
            remediator,
            options,
        }
    }

    pub fn remediator(&self) -> &R {
        &self.remediator
    }

    /// Read the manifest at `path` and process its entries.
    ///
    /// A manifest that cannot be read or has a malformed line fails the
    /// whole run before any entry is probed.
    pub fn run_manifest(&self, path: &Path, logger: &JobLogger) -> BatchResult<BatchSummary> {
        let entries = read_manifest(path).map_err(|e| {
            logger.error(&e.to_string());
            e
        })?;
        logger.info(&format!("Manifest: {}", path.display()));
        self.run(&entries, logger)
    }

    /// Process all entries in order.
    ///
    /// Entry failures are recorded in the summary. In fail-fast mode the
    /// first failure is returned as [`BatchError::EntryFailed`] instead.
    pub fn run(&self, entries: &[ManifestEntry], logger: &JobLogger) -> BatchResult<BatchSummary> {
        let total = entries.len();
        let mut summary = BatchSummary::default();
        let mut claimed_outputs: HashMap<PathBuf, usize> = HashMap::new();

        logger.phase(&format!("Processing {} entries", total));

        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            logger.info(&format!("{}/{}: {}", index, total, entry.location));

            let outcome = match self.process_entry(index, entry, &mut claimed_outputs, logger) {
                Ok(outcome) => outcome,
                Err(err) => {
                    logger.error(&format!("{} ({}): {}", entry.id, entry.location, err));
                    if self.options.fail_fast {
                        return Err(BatchError::entry_failed(index, &entry.id, err));
                    }
                    EntryOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };

            match &outcome {
                EntryOutcome::Corrected { .. } => logger.success(&outcome.describe()),
                EntryOutcome::Unhandled { .. } => logger.warn(&outcome.describe()),
                EntryOutcome::Aligned => logger.info(&outcome.describe()),
                EntryOutcome::Failed { .. } => {}
            }

            summary.push(EntryReport {
                index,
                id: entry.id.clone(),
                location: entry.location.clone(),
                outcome,
            });
        }

        logger.phase(&summary.describe());
        Ok(summary)
    }

    fn process_entry(
        &self,
        index: usize,
        entry: &ManifestEntry,
        claimed_outputs: &mut HashMap<PathBuf, usize>,
        logger: &JobLogger,
    ) -> EntryResult<EntryOutcome> {
        let raw = self.prober.probe(&entry.location)?;
        let record = normalize(&raw, &entry.location)?;
        let classification = classify(&record);

        tracing::debug!(
            id = %entry.id,
            container_start = record.container_start_time(),
            stream_starts = ?record.stream_start_times(),
            "classified as {}",
            classification.label()
        );

        let plan = match classification {
            SkewClassification::Aligned => return Ok(EntryOutcome::Aligned),
            SkewClassification::Unhandled => {
                return Ok(EntryOutcome::Unhandled {
                    container_start: record.container_start_time(),
                    stream_starts: record.stream_start_times(),
                })
            }
            SkewClassification::VideoLeadsAudioBySilentGap(gap) => {
                crate::skew::plan(&gap, record.file_name())
            }
        };

        let output_path = self.options.output_path(&plan.output_base_name);
        if let Some(&previous_index) = claimed_outputs.get(&output_path) {
            return Err(EntryError::OutputCollision {
                path: output_path.display().to_string(),
                previous_index,
            });
        }

        let args =
            FfmpegArgsBuilder::new(&plan, &entry.location, &self.options.encoding, &output_path)
                .build();
        logger.command(&format_command_line(self.remediator.tool_name(), &args));

        if !self.options.dry_run {
            self.remediator.remediate(&args, logger)?;
        }
        // A failed run leaves the name free for a later entry
        claimed_outputs.insert(output_path.clone(), index);

        Ok(EntryOutcome::Corrected {
            plan,
            output_path,
            executed: !self.options.dry_run,
        })
    }
}
