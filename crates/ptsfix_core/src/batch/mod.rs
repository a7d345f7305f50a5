//! Batch driver.
//!
//! Runs every manifest entry through probe → normalize → classify → plan →
//! remediate, one entry at a time. Each entry ends with exactly one
//! [`EntryOutcome`]; failures are isolated per entry unless fail-fast is on.

mod report;
mod runner;

pub use report::{BatchSummary, EntryOutcome, EntryReport};
pub use runner::{BatchOptions, BatchRunner};
