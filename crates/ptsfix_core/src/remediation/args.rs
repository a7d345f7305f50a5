//! ffmpeg command options builder.
//!
//! The generated command keeps the video stream untouched and rebuilds the
//! audio timeline:
//!
//! ```text
//! asetpts=PTS-STARTPTS          restart audio timestamps at zero
//! adelay=delays=500|500         prepend silence on every channel
//! apad                          pad audio so -shortest cuts on video
//! ```

use std::path::Path;

use crate::config::EncodingSettings;
use crate::skew::RemediationPlan;

/// Builder for ffmpeg command-line arguments.
///
/// Generates the argument list (without the program name) for one plan.
pub struct FfmpegArgsBuilder<'a> {
    plan: &'a RemediationPlan,
    input: &'a str,
    encoding: &'a EncodingSettings,
    output_path: &'a Path,
}

impl<'a> FfmpegArgsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(
        plan: &'a RemediationPlan,
        input: &'a str,
        encoding: &'a EncodingSettings,
        output_path: &'a Path,
    ) -> Self {
        Self {
            plan,
            input,
            encoding,
            output_path,
        }
    }

    /// Build the complete ffmpeg argument list.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        tokens.push("-i".to_string());
        tokens.push(self.input.to_string());

        // Video passes through
        tokens.push("-map".to_string());
        tokens.push("0:0".to_string());
        tokens.push("-vcodec".to_string());
        tokens.push("copy".to_string());

        // Audio gets re-timed and re-encoded
        tokens.push("-map".to_string());
        tokens.push("0:1".to_string());
        tokens.push("-af".to_string());
        tokens.push(self.audio_filter());
        self.add_audio_encoding(&mut tokens);

        self.add_global_options(&mut tokens);

        tokens.push(self.output_path.to_string_lossy().to_string());

        tokens
    }

    /// Audio filter chain for the plan's delay.
    pub fn audio_filter(&self) -> String {
        let delay = format!("{}", self.plan.delay_ms());
        let delays = vec![delay; self.plan.audio_channels.max(1) as usize].join("|");
        format!("asetpts=PTS-STARTPTS,adelay=delays={},apad", delays)
    }

    fn add_audio_encoding(&self, tokens: &mut Vec<String>) {
        tokens.push("-acodec".to_string());
        tokens.push(self.encoding.audio_codec.clone());
        tokens.push("-ab".to_string());
        tokens.push(self.encoding.audio_bitrate.clone());
        tokens.push("-ar".to_string());
        tokens.push(self.encoding.audio_sample_rate.to_string());
    }

    fn add_global_options(&self, tokens: &mut Vec<String>) {
        for opt in ["-shortest", "-loglevel", "error", "-stats", "-y", "-hide_banner"] {
            tokens.push(opt.to_string());
        }
    }
}

/// Render a command line for display (`ffmpeg -i ... out.mp4`).
pub fn format_command_line(tool: &str, args: &[String]) -> String {
    let mut line = String::from(tool);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
