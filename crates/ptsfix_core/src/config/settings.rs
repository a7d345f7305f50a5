//! Settings struct with TOML-based sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogConfig;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool binaries.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Audio re-encoding parameters for remediated files.
    #[serde(default)]
    pub encoding: EncodingSettings,

    /// Batch behavior.
    #[serde(default)]
    pub batch: BatchSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Names of the TOML tables this struct understands.
    pub const SECTIONS: [&'static str; 5] = ["paths", "tools", "encoding", "batch", "logging"];
}

/// Path configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Manifest of `<id>\t<location>` lines.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Folder for remediated files ("." = current directory).
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_manifest() -> String {
    "input.txt".to_string()
}

fn default_output_folder() -> String {
    ".".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// External tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffprobe: default_ffprobe(),
            ffmpeg: default_ffmpeg(),
        }
    }
}

/// Audio encoding for remediated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingSettings {
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Output sample rate in Hz.
    #[serde(default = "default_audio_sample_rate")]
    pub audio_sample_rate: u32,
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "256k".to_string()
}

fn default_audio_sample_rate() -> u32 {
    48000
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
            audio_sample_rate: default_audio_sample_rate(),
        }
    }
}

/// Batch behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Abort the whole run on the first failing entry.
    #[serde(default)]
    pub fail_fast: bool,

    /// Classify and plan, but never run ffmpeg.
    #[serde(default)]
    pub dry_run: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Keep ffmpeg output out of the console.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of ffmpeg output lines shown when it fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix log lines with the time of day.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

impl LoggingSettings {
    /// Convert to the logger's runtime configuration.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            compact: self.compact,
            error_tail: self.error_tail as usize,
            show_timestamps: self.show_timestamps,
            ..LogConfig::default()
        }
    }
}
