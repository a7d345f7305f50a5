//! Configuration management for ptsfix.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use ptsfix_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/ptsfix.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Manifest: {}", config.settings().paths.manifest);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    BatchSettings, EncodingSettings, LoggingSettings, PathSettings, Settings, ToolSettings,
};
