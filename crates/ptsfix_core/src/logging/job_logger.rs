//! Run log for one batch invocation.
//!
//! Every message lands in `<logs>/<run_name>.log` and, when a console
//! callback is installed, on the console as well. Output relayed from
//! ffmpeg is held in a bounded tail; in compact mode that tail is the only
//! place it goes until a failure replays it.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

/// Per-run logger shared by the batch runner and the remediation tool.
pub struct JobLogger {
    log_path: PathBuf,
    config: LogConfig,
    callback: Option<LogCallback>,
    state: Mutex<LogState>,
}

struct LogState {
    file: BufWriter<File>,
    tool_tail: VecDeque<String>,
}

impl JobLogger {
    /// Create `<log_dir>/<run_name>.log`, creating the directory if needed.
    pub fn new(
        run_name: &str,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", run_name));
        let file = BufWriter::new(File::create(&log_path)?);

        Ok(Self {
            log_path,
            state: Mutex::new(LogState {
                file,
                tool_tail: VecDeque::with_capacity(config.error_tail),
            }),
            config,
            callback,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, MessagePrefix::None, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, MessagePrefix::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, MessagePrefix::Error, message);
    }

    pub fn success(&self, message: &str) {
        self.emit(LogLevel::Info, MessagePrefix::Success, message);
    }

    /// Record the command line about to be executed.
    pub fn command(&self, command_line: &str) {
        self.emit(LogLevel::Info, MessagePrefix::Command, command_line);
    }

    pub fn phase(&self, name: &str) {
        self.emit(LogLevel::Info, MessagePrefix::Phase, name);
    }

    /// Relay one line of tool output.
    ///
    /// The line always enters the tail; it is written out immediately only
    /// when compact mode is off.
    pub fn output_line(&self, line: &str) {
        if self.config.error_tail > 0 {
            let mut state = self.state.lock();
            if state.tool_tail.len() == self.config.error_tail {
                state.tool_tail.pop_front();
            }
            state.tool_tail.push_back(line.to_string());
        }

        if !self.config.compact {
            self.write_line(line);
        }
    }

    /// Forget relayed output from a previous tool run.
    pub fn clear_tail(&self) {
        self.state.lock().tool_tail.clear();
    }

    /// Replay the tail under a `[<tool>/tail]` header and empty it.
    pub fn show_tail(&self, tool: &str) {
        let lines: Vec<String> = self.state.lock().tool_tail.drain(..).collect();
        if lines.is_empty() {
            return;
        }

        self.write_line(&format!("[{}/tail]", tool));
        for line in &lines {
            self.write_line(line);
        }
    }

    pub fn flush(&self) {
        let _ = self.state.lock().file.flush();
    }

    fn emit(&self, level: LogLevel, prefix: MessagePrefix, message: &str) {
        if level >= self.config.level {
            self.write_line(&prefix.format(message));
        }
    }

    fn write_line(&self, text: &str) {
        let line = if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), text)
        } else {
            text.to_string()
        };

        // Log file errors must not abort the batch
        let _ = writeln!(self.state.lock().file, "{}", line);

        if let Some(callback) = &self.callback {
            callback(&line);
        }
    }
}
