//! Pipeline stages for generating a label sheet.
//!
//! Each submodule implements exactly one step, in the order a run executes
//! them:
//!
//! ```text
//! target ──▶ layout ──▶ render
//! (checks)   (grid)     (printpdf)
//! ```
//!
//! 1. [`target`]  — confirm the output directory exists and is writable
//!    before any work is done
//! 2. [`layout`]  — serial range, cell geometry and the row-major sequence
//!    of placed labels
//! 3. [`metrics`] — Helvetica advance widths used to centre text in a cell
//! 4. [`render`]  — draw every placed label and serialise the PDF in memory

pub mod layout;
pub mod metrics;
pub mod render;
pub mod target;
