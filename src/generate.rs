//! Label run entry points.
//!
//! [`generate_labels`] is the whole command: check the target directory,
//! render every sheet in memory, then write one PDF named after the first
//! and last label. [`render_labels`] stops before the file system and hands
//! back the PDF bytes instead.

use crate::config::LabelRunConfig;
use crate::error::LabelError;
use crate::output::LabelRunSummary;
use crate::pipeline::layout::{LabelLayout, SerialRange};
use crate::pipeline::{render, target};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Generate the label PDF described by `config` inside `config.target`.
///
/// # Errors
/// Configuration errors (missing or read-only target, bad template,
/// overflowing range) are returned before anything is rendered. Rendering
/// and write errors leave the target directory unchanged.
pub fn generate_labels(config: &LabelRunConfig) -> Result<LabelRunSummary, LabelError> {
    let started = Instant::now();

    // ── Step 1: Validate ─────────────────────────────────────────────────
    target::validate_target(&config.target)?;
    config.validate()?;
    let range = config.serial_range()?;
    let filename = output_filename(config)?;
    let path = config.target.join(&filename);
    info!(
        "Generating {} labels on {} {} page(s) → {}",
        range.len(),
        config.pages,
        config.sheet_size,
        path.display()
    );

    // ── Step 2: Render ───────────────────────────────────────────────────
    let bytes = render_labels(config)?;

    // ── Step 3: Persist ──────────────────────────────────────────────────
    write_atomic(&config.target, &path, &bytes)?;

    info!(
        "Produced ASN labels from {} to {}.",
        range.start(),
        range.end()
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_complete(config.pages as usize, &path);
    }

    Ok(LabelRunSummary {
        path,
        filename,
        first_asn: range.start(),
        last_asn: range.end(),
        first_label: config.format.render(range.start()),
        last_label: config.format.render(range.end()),
        pages: config.pages,
        labels: range.len(),
        sheet_size: config.sheet_size,
        bytes: bytes.len(),
        duration_ms: started.elapsed().as_millis() as u64,
    })
}

/// Render the labels described by `config` to PDF bytes.
///
/// Ignores `config.target`; nothing is written to disk.
pub fn render_labels(config: &LabelRunConfig) -> Result<Vec<u8>, LabelError> {
    config.validate()?;
    let layout = LabelLayout::new(config)?;
    let range = layout.range();

    if let Some(serial) = first_overflowing_serial(config, range) {
        warn!(
            "Serial {} has more digits than the {}-wide field in '{}'; labels from there on are wider",
            serial,
            config.format.width(),
            config.format
        );
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_start(layout.pages(), range.len());
    }

    let title = format!(
        "ASN labels {}-{}",
        config.format.render(range.start()),
        config.format.render(range.end())
    );
    render::render_document(config, &layout, &title)
}

/// File name for the run: `<first label>-<last label>.pdf`.
///
/// # Errors
/// [`LabelError::InvalidFormat`] when the rendered labels contain a path
/// separator, which would place the file outside the target directory.
pub fn output_filename(config: &LabelRunConfig) -> Result<String, LabelError> {
    let range = config.serial_range()?;
    let filename = format!(
        "{}-{}.pdf",
        config.format.render(range.start()),
        config.format.render(range.end())
    );
    if filename.contains(&['/', '\\', '\0'][..]) {
        return Err(LabelError::InvalidFormat {
            template: config.format.to_string(),
            reason: format!("output file name '{filename}' contains a path separator"),
        });
    }
    Ok(filename)
}

/// Smallest serial in `range` that no longer fits the template's width.
fn first_overflowing_serial(config: &LabelRunConfig, range: SerialRange) -> Option<u64> {
    if !config.format.overflows(range.end()) {
        return None;
    }
    let width = u32::try_from(config.format.width()).ok()?;
    let threshold = 10u64.checked_pow(width)?;
    Some(threshold.max(range.start()))
}

/// Write `bytes` to `path` via a temp file in `dir` and a rename, so readers
/// never observe a half-written PDF. An existing file is replaced.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), LabelError> {
    let write_err = |source: std::io::Error| LabelError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn default_filename() {
        let config = LabelRunConfig::builder().build().unwrap();
        assert_eq!(
            output_filename(&config).unwrap(),
            "<ASN:000000001>-<ASN:000000056>.pdf"
        );
    }

    #[test]
    fn filename_uses_computed_end() {
        let config = LabelRunConfig::builder()
            .asn_start(100)
            .rows(2)
            .columns(3)
            .pages(2)
            .format_str("ASN{:05}")
            .build()
            .unwrap();
        assert_eq!(output_filename(&config).unwrap(), "ASN00100-ASN00111.pdf");
    }

    #[test]
    fn filename_with_separator_is_rejected() {
        let config = LabelRunConfig::builder()
            .format_str("../{:04}")
            .build()
            .unwrap();
        let err = output_filename(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn overflow_threshold() {
        let config = LabelRunConfig::builder()
            .asn_start(990)
            .format_str("{:03}")
            .build()
            .unwrap();
        let range = config.serial_range().unwrap();
        assert_eq!(first_overflowing_serial(&config, range), Some(1000));

        let fits = LabelRunConfig::builder().build().unwrap();
        assert_eq!(
            first_overflowing_serial(&fits, fits.serial_range().unwrap()),
            None
        );

        let already_wide = LabelRunConfig::builder()
            .asn_start(5000)
            .format_str("{:03}")
            .build()
            .unwrap();
        assert_eq!(
            first_overflowing_serial(&already_wide, already_wide.serial_range().unwrap()),
            Some(5000)
        );
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"old").unwrap();
        write_atomic(dir.path(), &path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn render_labels_ignores_target() {
        let config = LabelRunConfig::builder()
            .target("/definitely/not/here")
            .rows(1)
            .columns(1)
            .build()
            .unwrap();
        let bytes = render_labels(&config).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
