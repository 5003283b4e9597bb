//! Result types returned by a label run.

use crate::config::SheetSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a successful run produced.
///
/// Serialisable so the CLI can print it with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRunSummary {
    /// Absolute or target-relative path of the written PDF.
    pub path: PathBuf,
    /// File name alone, `<first label>-<last label>.pdf`.
    pub filename: String,
    /// First serial number printed.
    pub first_asn: u64,
    /// Last serial number printed.
    pub last_asn: u64,
    /// Rendered text of the first label.
    pub first_label: String,
    /// Rendered text of the last label.
    pub last_label: String,
    pub pages: u32,
    /// Total labels across all pages.
    pub labels: u64,
    pub sheet_size: SheetSize,
    /// Size of the written file in bytes.
    pub bytes: usize,
    /// Wall-clock time for the whole run.
    pub duration_ms: u64,
}
