//! Remediation tool execution.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use crate::errors::{EntryError, EntryResult};
use crate::logging::JobLogger;

/// Runs a remediation command built by [`super::FfmpegArgsBuilder`].
///
/// The batch runner depends on this trait so tests can record invocations
/// instead of spawning processes.
pub trait Remediator {
    /// Name of the tool, used for display and errors.
    fn tool_name(&self) -> &str;

    /// Run the tool with the given arguments.
    fn remediate(&self, args: &[String], logger: &JobLogger) -> EntryResult<()>;
}

/// [`Remediator`] backed by the `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct FfmpegCli {
    binary: String,
}

impl FfmpegCli {
    /// Create a remediator that runs the given ffmpeg binary.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegCli {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Remediator for FfmpegCli {
    fn tool_name(&self) -> &str {
        &self.binary
    }

    fn remediate(&self, args: &[String], logger: &JobLogger) -> EntryResult<()> {
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EntryError::tool_spawn(&self.binary, e))?;

        logger.clear_tail();

        // Progress and errors both arrive on stderr. A read failure only
        // stops the relay; the exit status still decides the outcome.
        let mut last_line = String::new();
        if let Some(stderr) = child.stderr.take() {
            if let Err(e) = relay_output(stderr, logger, &mut last_line) {
                tracing::warn!("Stopped reading {} output: {}", self.binary, e);
            }
        }

        let status = child
            .wait()
            .map_err(|e| EntryError::io("waiting for ffmpeg", e))?;

        if !status.success() {
            logger.show_tail(&self.binary);
            return Err(EntryError::remediation_failed(
                &self.binary,
                status.code().unwrap_or(-1),
                last_line,
            ));
        }

        Ok(())
    }
}

/// Forward tool output to the logger, one progress update per line.
///
/// ffmpeg rewrites its progress line with `\r`, and file names in its
/// messages need not be UTF-8, so raw lines are split and decoded lossily.
fn relay_output(
    output: impl Read,
    logger: &JobLogger,
    last_line: &mut String,
) -> io::Result<()> {
    let mut reader = BufReader::new(output);
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(());
        }

        let text = String::from_utf8_lossy(&raw);
        for part in text.split(['\r', '\n']).filter(|p| !p.trim().is_empty()) {
            logger.output_line(part);
            *last_line = part.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogConfig;
    use tempfile::tempdir;

    #[test]
    fn missing_binary_is_spawn_error() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("run", dir.path(), LogConfig::default(), None).unwrap();

        let remediator = FfmpegCli::new("/nonexistent/bin/ffmpeg");
        let result = remediator.remediate(&["-version".to_string()], &logger);

        assert!(matches!(result, Err(EntryError::ToolSpawn { .. })));
    }

    /// Write an executable shell script standing in for ffmpeg.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &std::path::Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[cfg(unix)]
    fn verbose_logger(dir: &std::path::Path) -> JobLogger {
        let config = LogConfig {
            compact: false,
            show_timestamps: false,
            ..LogConfig::default()
        };
        JobLogger::new("run", dir, config, None).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_output_with_zero_exit_succeeds_after_child_exits() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("finished");
        let binary = fake_ffmpeg(
            dir.path(),
            "printf 'Input #0, from caf\\351.mov\\n' >&2\nsleep 1\ntouch \"$1\"\nexit 0",
        );
        let logger = verbose_logger(dir.path());

        let result =
            FfmpegCli::new(binary).remediate(&[marker.to_string_lossy().to_string()], &logger);

        assert!(result.is_ok(), "unexpected error: {:?}", result);
        assert!(marker.exists());
        logger.flush();
        let log = std::fs::read_to_string(logger.log_path()).unwrap();
        assert!(log.contains("Input #0, from caf\u{FFFD}.mov"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_last_output_line() {
        let dir = tempdir().unwrap();
        let binary = fake_ffmpeg(
            dir.path(),
            "printf 'frame=1\\rframe=2\\n' >&2\nprintf 'caf\\351.mov: Invalid data\\n' >&2\nexit 3",
        );
        let logger = verbose_logger(dir.path());

        let result = FfmpegCli::new(&binary).remediate(&[], &logger);

        match result {
            Err(EntryError::RemediationFailed {
                tool,
                exit_code,
                message,
            }) => {
                assert_eq!(tool, binary);
                assert_eq!(exit_code, 3);
                assert_eq!(message, "caf\u{FFFD}.mov: Invalid data");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        logger.flush();
        let log = std::fs::read_to_string(logger.log_path()).unwrap();
        assert!(log.contains("frame=1\nframe=2\n"));
        assert!(log.contains("/tail]"));
    }

    #[test]
    fn tool_name_is_binary() {
        assert_eq!(FfmpegCli::default().tool_name(), "ffmpeg");
    }
}
