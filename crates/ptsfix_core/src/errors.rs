//! Error types for the batch pipeline.
//!
//! Errors carry context that chains through layers:
//! Batch → Entry → Operation → Detail

use std::io;

use thiserror::Error;

use crate::manifest::ManifestError;

/// Top-level batch error.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The manifest could not be read or parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// An entry failed while running in fail-fast mode.
    #[error("Entry {index} ({id}) failed: {source}")]
    EntryFailed {
        index: usize,
        id: String,
        #[source]
        source: EntryError,
    },
}

impl BatchError {
    /// Create an entry failed error.
    pub fn entry_failed(index: usize, id: impl Into<String>, source: EntryError) -> Self {
        Self::EntryFailed {
            index,
            id: id.into(),
            source,
        }
    }
}

/// Error while processing a single manifest entry.
#[derive(Error, Debug)]
pub enum EntryError {
    /// A start-time field is not a finite decimal number.
    #[error("Invalid timing field {field}: {raw:?} is not a number")]
    InvalidTimingField { field: String, raw: String },

    /// The probing tool could not produce usable metadata.
    #[error("Probe of {location} failed: {message}")]
    ProbeFailed { location: String, message: String },

    /// The remediation tool exited unsuccessfully.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    RemediationFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// An external tool could not be started.
    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Another entry in the same run already targets this output.
    #[error("Output {path} is already produced by entry {previous_index}")]
    OutputCollision { path: String, previous_index: usize },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl EntryError {
    /// Create an invalid timing field error.
    pub fn invalid_timing_field(field: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidTimingField {
            field: field.into(),
            raw: raw.into(),
        }
    }

    /// Create a probe failed error.
    pub fn probe_failed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a remediation failed error.
    pub fn remediation_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::RemediationFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a tool spawn error.
    pub fn tool_spawn(tool: impl Into<String>, source: io::Error) -> Self {
        Self::ToolSpawn {
            tool: tool.into(),
            source,
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for entry operations.
pub type EntryResult<T> = Result<T, EntryError>;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
