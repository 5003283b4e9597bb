//! Output directory checks.
//!
//! A run must fail before rendering anything when it could never write its
//! result, so the directory is validated up front: it has to exist, be a
//! directory, and accept new files.

use crate::error::LabelError;
use std::path::Path;
use tracing::debug;

/// Ensure `path` is an existing, writable directory.
///
/// Writability is probed by creating an anonymous temporary file inside the
/// directory, which is removed again as soon as it is dropped. Mode bits
/// alone get ACLs and read-only mounts wrong.
pub fn validate_target(path: &Path) -> Result<(), LabelError> {
    let metadata = std::fs::metadata(path).map_err(|_| LabelError::TargetNotFound {
        path: path.to_path_buf(),
    })?;

    if !metadata.is_dir() {
        return Err(LabelError::TargetNotADirectory {
            path: path.to_path_buf(),
        });
    }

    tempfile::tempfile_in(path).map_err(|e| {
        debug!("Write probe in {} failed: {}", path.display(), e);
        LabelError::TargetNotWritable {
            path: path.to_path_buf(),
        }
    })?;

    debug!("Target directory OK: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_directory_passes() {
        let dir = TempDir::new().unwrap();
        validate_target(dir.path()).unwrap();
        // The probe leaves nothing behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = validate_target(&missing).unwrap_err();
        assert!(matches!(err, LabelError::TargetNotFound { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn regular_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("labels.txt");
        std::fs::write(&file, b"not a dir").unwrap();
        let err = validate_target(&file).unwrap_err();
        assert!(matches!(err, LabelError::TargetNotADirectory { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unwritable_directory_fails() {
        let err = validate_target(Path::new("/proc")).unwrap_err();
        assert!(matches!(err, LabelError::TargetNotWritable { .. }));
    }
}
