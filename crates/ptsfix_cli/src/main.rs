//! ptsfix - command line entry point.
//!
//! Loads configuration, reads the manifest, and runs every entry through
//! ffprobe, the skew classifier and (when a fix applies) ffmpeg.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use ptsfix_core::batch::{BatchOptions, BatchRunner};
use ptsfix_core::config::{ConfigManager, Settings};
use ptsfix_core::logging::{
    init_tracing_with_file, run_timestamp, JobLogger, LogCallback, LogLevel,
};
use ptsfix_core::probe::FfprobeCli;
use ptsfix_core::remediation::FfmpegCli;

/// Detect start-time skew in media files and realign late stereo audio.
#[derive(Parser, Debug)]
#[command(name = "ptsfix", author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = ".config/ptsfix.toml")]
    config: PathBuf,

    /// Manifest of "<id>\t<location>" lines (overrides config)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Folder for remediated files (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Classify and print commands without running ffmpeg
    #[arg(long)]
    dry_run: bool,

    /// Stop at the first entry that fails
    #[arg(long)]
    fail_fast: bool,

    /// Show ffmpeg output and debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(manifest) = &self.manifest {
            settings.paths.manifest = manifest.to_string_lossy().to_string();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.paths.output_folder = output_dir.to_string_lossy().to_string();
        }
        if self.dry_run {
            settings.batch.dry_run = true;
        }
        if self.fail_fast {
            settings.batch.fail_fast = true;
        }
        if self.verbose {
            settings.logging.compact = false;
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("ptsfix: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every entry succeeded.
fn run() -> Result<bool> {
    let args = Args::parse();

    let mut config_manager = ConfigManager::new(&args.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }
    args.apply_overrides(config_manager.settings_mut());

    config_manager
        .ensure_dirs_exist()
        .context("Failed to create output or log directories")?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let logs_dir = config_manager.logs_folder();
    let _log_guard = init_tracing_with_file(level, &logs_dir);

    let settings = config_manager.settings().clone();
    tracing::info!("ptsfix {} starting", ptsfix_core::version());
    tracing::info!("Config: {}", config_manager.path().display());

    let run_name = format!("batch_{}", run_timestamp());
    let mut log_config = settings.logging.to_log_config();
    log_config.level = level;
    let console: LogCallback = Box::new(|line: &str| println!("{}", line));
    let logger = JobLogger::new(&run_name, &logs_dir, log_config, Some(console))
        .context("Failed to open run log")?;

    let runner = BatchRunner::new(
        FfprobeCli::new(&settings.tools.ffprobe),
        FfmpegCli::new(&settings.tools.ffmpeg),
        BatchOptions::from_settings(&settings),
    );

    let manifest_path = PathBuf::from(&settings.paths.manifest);
    let summary = runner.run_manifest(&manifest_path, &logger)?;
    tracing::info!("Run log: {}", logger.log_path().display());

    Ok(summary.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "ptsfix",
            "--manifest",
            "list.txt",
            "--output-dir",
            "fixed",
            "--dry-run",
            "--verbose",
        ]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);

        assert_eq!(settings.paths.manifest, "list.txt");
        assert_eq!(settings.paths.output_folder, "fixed");
        assert!(settings.batch.dry_run);
        assert!(!settings.batch.fail_fast);
        assert!(!settings.logging.compact);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["ptsfix"]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);

        assert_eq!(settings, Settings::default());
        assert_eq!(args.config, PathBuf::from(".config/ptsfix.toml"));
    }
}
