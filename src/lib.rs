//! # asn-labels
//!
//! Generate printable PDF sheets of sequential Archive Serial Number (ASN)
//! labels such as `<ASN:000000123>`. Stick a label on a paper document
//! before scanning it; the document archive reads the number back from the
//! scan and files the document under it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! LabelRunConfig
//!  │
//!  ├─ 1. Target  output directory exists and is writable
//!  ├─ 2. Layout  serial range + rows × columns grid per sheet
//!  ├─ 3. Render  one centred Helvetica label per cell (printpdf)
//!  └─ 4. Output  <first>-<last>.pdf written atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asn_labels::{generate_labels, LabelRunConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LabelRunConfig::builder()
//!         .target("/srv/scans/labels")
//!         .asn_start(1001)
//!         .pages(5)
//!         .build()?;
//!     let summary = generate_labels(&config)?;
//!     println!("wrote {}", summary.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `generate_labels` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! asn-labels = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LabelRunConfig, LabelRunConfigBuilder, SheetSize, TextColor};
pub use error::{ErrorKind, LabelError};
pub use format::{LabelFormat, DEFAULT_FORMAT};
pub use generate::{generate_labels, output_filename, render_labels};
pub use output::LabelRunSummary;
pub use pipeline::layout::{GridCell, LabelLayout, PlacedLabel, SerialRange};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
