//! Shared data models: definition schema, name index, and run reports.

pub mod index;
pub mod rockon;

use serde::Serialize;

#[derive(Serialize, Debug)]
/// Per-document outcome of one run.
pub struct FileReport {
    pub file: String,
    pub changed: bool,
    pub skipped: bool,
    pub wrote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

#[derive(Serialize, Debug)]
/// Outcome for the index document.
pub struct IndexReport {
    pub file: String,
    pub changed: bool,
    pub wrote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

#[derive(Serialize)]
/// Aggregated counters used by printers.
pub struct RunSummary {
    pub files: usize,
    pub skipped: usize,
    pub divergent: usize,
    pub wrote: usize,
}
