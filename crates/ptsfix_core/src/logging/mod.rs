//! Logging infrastructure for ptsfix.
//!
//! Two layers: the global `tracing` subscriber (stderr plus a daily rolling
//! file) and the per-run [`JobLogger`] that records the batch itself.
//!
//! # Example
//!
//! ```no_run
//! use ptsfix_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::new("batch_20261019_143512", "/path/to/logs", LogConfig::default(), None)?;
//!
//! logger.phase("Processing 1 entries");
//! logger.command("ffmpeg -i input.mov ...");
//! logger.success("clip_ptsfix.mp4 written");
//! # Ok::<(), std::io::Error>(())
//! ```

mod job_logger;
mod types;

pub use job_logger::JobLogger;
pub use types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing to stderr plus a daily rolling file in `log_dir`.
///
/// The returned guard must be kept alive for the file writer to flush.
pub fn init_tracing_with_file(default_level: LogLevel, log_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "ptsfix.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(env_filter(default_level))
        .init();

    guard
}

/// Local timestamp for run log names, e.g. `20261019_143512`.
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)))
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
