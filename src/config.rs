//! Configuration types for a label run.
//!
//! All behaviour is controlled through [`LabelRunConfig`], built via its
//! [`LabelRunConfigBuilder`]. Every knob has the same default as the
//! `generate_labels` command line, so `LabelRunConfig::builder().target(dir)`
//! alone produces one A4 sheet of 14 × 4 labels starting at
//! `<ASN:000000001>`.

use crate::error::LabelError;
use crate::format::LabelFormat;
use crate::pipeline::layout::SerialRange;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for one label run.
///
/// Built via [`LabelRunConfig::builder()`]. Fields are public for reading;
/// go through the builder to get validation.
///
/// # Example
/// ```rust
/// use asn_labels::{LabelRunConfig, SheetSize};
///
/// let config = LabelRunConfig::builder()
///     .target("/tmp")
///     .asn_start(500)
///     .pages(2)
///     .sheet_size(SheetSize::Letter)
///     .build()
///     .unwrap();
/// assert_eq!(config.serial_range().unwrap().end(), 500 + 2 * 14 * 4 - 1);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct LabelRunConfig {
    /// Directory the PDF is written into. Must exist and be writable.
    pub target: PathBuf,

    /// First serial number printed. Default: 1.
    pub asn_start: u64,

    /// Label text template. Default: `<ASN:{:09}>`.
    pub format: LabelFormat,

    /// Rows of labels per sheet. Default: 14.
    pub rows: u32,

    /// Columns of labels per sheet. Default: 4.
    pub columns: u32,

    /// Number of sheets. Default: 1.
    pub pages: u32,

    /// Paper size. Default: A4.
    pub sheet_size: SheetSize,

    /// Text colour. Default: black.
    pub color: TextColor,

    /// Font size in points. Default: 12.
    pub font_size: u32,

    /// Optional per-page progress events.
    #[serde(skip)]
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for LabelRunConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("."),
            asn_start: 1,
            format: LabelFormat::default(),
            rows: 14,
            columns: 4,
            pages: 1,
            sheet_size: SheetSize::default(),
            color: TextColor::default(),
            font_size: 12,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for LabelRunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelRunConfig")
            .field("target", &self.target)
            .field("asn_start", &self.asn_start)
            .field("format", &self.format.as_str())
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("pages", &self.pages)
            .field("sheet_size", &self.sheet_size)
            .field("color", &self.color)
            .field("font_size", &self.font_size)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn GenerationProgressCallback>"),
            )
            .finish()
    }
}

impl LabelRunConfig {
    /// Create a new builder for `LabelRunConfig`.
    pub fn builder() -> LabelRunConfigBuilder {
        LabelRunConfigBuilder {
            config: Self::default(),
            format_error: None,
        }
    }

    /// Labels on one sheet.
    pub fn labels_per_page(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }

    /// Labels across the whole run, or `None` if the count does not fit in
    /// a `u64`.
    pub fn total_labels(&self) -> Option<u64> {
        self.labels_per_page().checked_mul(u64::from(self.pages))
    }

    /// Check counts and the serial range. Runs in the builder and again at
    /// the start of every run.
    pub fn validate(&self) -> Result<(), LabelError> {
        for (name, value) in [
            ("rows", self.rows),
            ("columns", self.columns),
            ("pages", self.pages),
            ("font size", self.font_size),
        ] {
            if value == 0 {
                return Err(LabelError::InvalidConfig(format!(
                    "{name} must be ≥ 1, got 0"
                )));
            }
        }
        self.serial_range()?;
        Ok(())
    }

    /// Inclusive range of serial numbers this run prints.
    pub fn serial_range(&self) -> Result<SerialRange, LabelError> {
        let count = self.total_labels().ok_or_else(|| {
            LabelError::InvalidConfig(format!(
                "{} rows × {} columns × {} pages is more labels than fit in 64 bits",
                self.rows, self.columns, self.pages
            ))
        })?;
        SerialRange::new(self.asn_start, count)
    }
}

/// Builder for [`LabelRunConfig`].
pub struct LabelRunConfigBuilder {
    config: LabelRunConfig,
    format_error: Option<LabelError>,
}

impl fmt::Debug for LabelRunConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelRunConfigBuilder")
            .field("config", &self.config)
            .field("format_error", &self.format_error)
            .finish()
    }
}

impl LabelRunConfigBuilder {
    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.config.target = target.into();
        self
    }

    pub fn asn_start(mut self, start: u64) -> Self {
        self.config.asn_start = start;
        self
    }

    /// Use an already-parsed template.
    pub fn format(mut self, format: LabelFormat) -> Self {
        self.config.format = format;
        self.format_error = None;
        self
    }

    /// Parse `template`; a bad template surfaces from [`build`](Self::build).
    pub fn format_str(mut self, template: &str) -> Self {
        match LabelFormat::parse(template) {
            Ok(format) => {
                self.config.format = format;
                self.format_error = None;
            }
            Err(e) => self.format_error = Some(e),
        }
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn pages(mut self, pages: u32) -> Self {
        self.config.pages = pages;
        self
    }

    pub fn sheet_size(mut self, size: SheetSize) -> Self {
        self.config.sheet_size = size;
        self
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.config.color = color;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.config.font_size = size;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Does not touch the file system; the target directory is checked when
    /// the run starts.
    pub fn build(self) -> Result<LabelRunConfig, LabelError> {
        if let Some(e) = self.format_error {
            return Err(e);
        }
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Sheet size ───────────────────────────────────────────────────────────

/// Supported paper sizes, always used in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SheetSize {
    A3,
    #[default]
    A4,
    A5,
    #[serde(rename = "letter")]
    Letter,
    #[serde(rename = "legal")]
    Legal,
}

impl SheetSize {
    /// Every supported size, in the order shown in help text.
    pub const ALL: [SheetSize; 5] = [
        SheetSize::A3,
        SheetSize::A4,
        SheetSize::A5,
        SheetSize::Letter,
        SheetSize::Legal,
    ];

    /// Portrait `(width, height)` in millimetres.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            SheetSize::A3 => (297.0, 420.0),
            SheetSize::A4 => (210.0, 297.0),
            SheetSize::A5 => (148.0, 210.0),
            SheetSize::Letter => (215.9, 279.4),
            SheetSize::Legal => (215.9, 355.6),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SheetSize::A3 => "A3",
            SheetSize::A4 => "A4",
            SheetSize::A5 => "A5",
            SheetSize::Letter => "letter",
            SheetSize::Legal => "legal",
        }
    }
}

impl FromStr for SheetSize {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LabelError::UnknownSheetSize {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Colour ───────────────────────────────────────────────────────────────

/// Label text colour as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0` as PDF colour operators expect.
    pub fn to_unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl From<[u8; 3]> for TextColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}
