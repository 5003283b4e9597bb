//! Error types for the asn-labels library.
//!
//! Every failure is fatal: a label run either produces its one PDF file or
//! nothing at all. Variants still fall into two families, exposed through
//! [`LabelError::kind`]:
//!
//! * [`ErrorKind::Configuration`] — the request itself is unusable (missing
//!   or read-only target directory, unknown sheet size, broken format
//!   template). Raised before any page is rendered.
//!
//! * [`ErrorKind::Rendering`] — the request was fine but building the
//!   document or writing it to disk failed.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the asn-labels library.
#[derive(Debug, Error)]
pub enum LabelError {
    // ── Target errors ─────────────────────────────────────────────────────
    /// Output directory does not exist.
    #[error("That path doesn't exist: '{path}'")]
    TargetNotFound { path: PathBuf },

    /// Output path exists but is a file, not a directory.
    #[error("That path is not a directory: '{path}'")]
    TargetNotADirectory { path: PathBuf },

    /// Output directory exists but cannot be written to.
    #[error("That path doesn't appear to be writable: '{path}'\nTry: chmod u+w {path:?}")]
    TargetNotWritable { path: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Sheet size name is not one of A3, A4, A5, letter, legal.
    #[error("Unsupported sheet size '{value}'\nSupported formats: A3, A4, A5, letter, legal")]
    UnknownSheetSize { value: String },

    /// The label format template cannot be used.
    #[error("Invalid label format '{template}': {reason}")]
    InvalidFormat { template: String, reason: String },

    /// The last serial number of the run does not fit in 64 bits.
    #[error("Serial range starting at {start} with {count} labels overflows")]
    SerialOverflow { start: u64, count: u64 },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Rendering errors ──────────────────────────────────────────────────
    /// The PDF backend failed while building or serialising the document.
    #[error("Rendering failed: {detail}")]
    RenderFailed { detail: String },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`LabelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid request; nothing was rendered.
    Configuration,
    /// Failure while rendering or persisting the document.
    Rendering,
}

impl LabelError {
    /// Which family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::TargetNotFound { .. }
            | LabelError::TargetNotADirectory { .. }
            | LabelError::TargetNotWritable { .. }
            | LabelError::UnknownSheetSize { .. }
            | LabelError::InvalidFormat { .. }
            | LabelError::SerialOverflow { .. }
            | LabelError::InvalidConfig(_) => ErrorKind::Configuration,
            LabelError::RenderFailed { .. } | LabelError::OutputWriteFailed { .. } => {
                ErrorKind::Rendering
            }
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::Configuration`.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub(crate) fn invalid_format(template: &str, reason: impl Into<String>) -> Self {
        LabelError::InvalidFormat {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_not_found_display() {
        let e = LabelError::TargetNotFound {
            path: PathBuf::from("/nope"),
        };
        let msg = e.to_string();
        assert!(msg.contains("doesn't exist"), "got: {msg}");
        assert!(msg.contains("/nope"));
    }

    #[test]
    fn not_writable_display() {
        let e = LabelError::TargetNotWritable {
            path: PathBuf::from("/ro"),
        };
        assert!(e.to_string().contains("writable"));
    }

    #[test]
    fn unknown_sheet_size_lists_supported() {
        let e = LabelError::UnknownSheetSize {
            value: "B5".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("B5"));
        assert!(msg.contains("letter"));
    }

    #[test]
    fn kinds_split_configuration_and_rendering() {
        assert_eq!(
            LabelError::InvalidConfig("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            LabelError::invalid_format("<ASN>", "no placeholder").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            LabelError::RenderFailed {
                detail: "boom".into()
            }
            .kind(),
            ErrorKind::Rendering
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let e = LabelError::OutputWriteFailed {
            path: PathBuf::from("/tmp/x.pdf"),
            source: io,
        };
        assert!(!e.is_configuration());
        assert!(e.to_string().contains("disk full"));
    }
}
