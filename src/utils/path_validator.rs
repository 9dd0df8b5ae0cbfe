use crate::error::{BumpError, Result};
use std::path::{Path, PathBuf};

const FORBIDDEN: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// Checks requirements file locations before any environment is touched.
pub struct PathValidator;

impl PathValidator {
    /// Validates and canonicalises the requirements document to read.
    pub fn validate_input_file(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            BumpError::PathValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_file() {
            return Err(BumpError::PathValidation(format!(
                "Path '{}' is not a file",
                canonical.display()
            )));
        }

        Self::reject_system_directory(path, &canonical)?;
        Ok(canonical)
    }

    /// Ensures the document to write lands in an existing, non-system directory.
    ///
    /// The file itself may not exist yet, so only its parent is canonicalised.
    pub fn validate_output_file(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let file_name = path.file_name().ok_or_else(|| {
            BumpError::PathValidation(format!("Output path '{}' has no file name", path.display()))
        })?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let canonical_parent = parent.canonicalize().map_err(|e| {
            BumpError::PathValidation(format!(
                "Invalid output directory '{}': {e}",
                parent.display()
            ))
        })?;

        if !canonical_parent.is_dir() {
            return Err(BumpError::PathValidation(format!(
                "Path '{}' is not a directory",
                canonical_parent.display()
            )));
        }

        let canonical = canonical_parent.join(file_name);
        if canonical.is_dir() {
            return Err(BumpError::PathValidation(format!(
                "Output path '{}' is a directory",
                canonical.display()
            )));
        }

        Self::reject_system_directory(path, &canonical)?;
        Ok(canonical)
    }

    fn reject_system_directory(path: &Path, canonical: &Path) -> Result<()> {
        for forbidden in FORBIDDEN {
            let forbidden_path = Path::new(forbidden);

            if path.starts_with(forbidden_path) || canonical.starts_with(forbidden_path) {
                return Err(BumpError::PathValidation(format!(
                    "Access to system directory '{}' is not allowed",
                    forbidden
                )));
            }

            if let Ok(canonical_forbidden) = forbidden_path.canonicalize() {
                if canonical.starts_with(&canonical_forbidden) {
                    return Err(BumpError::PathValidation(format!(
                        "Access to system directory '{}' is not allowed",
                        forbidden
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn validate_input_file_accepts_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("requirements.txt");
        fs::write(&file_path, "3.9\n").unwrap();
        assert!(PathValidator::validate_input_file(&file_path).is_ok());
    }

    #[test]
    fn validate_input_file_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = PathValidator::validate_input_file(dir.path()).unwrap_err();
        assert!(matches!(err, BumpError::PathValidation(_)));
    }

    #[test]
    fn validate_input_file_rejects_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(PathValidator::validate_input_file(missing).is_err());
    }

    #[test]
    fn validate_output_file_accepts_new_file_in_existing_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("requirements_new.txt");
        let validated = PathValidator::validate_output_file(&target).unwrap();
        assert_eq!(validated.file_name(), target.file_name());
    }

    #[test]
    fn validate_output_file_rejects_missing_parent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nope").join("requirements_new.txt");
        assert!(PathValidator::validate_output_file(target).is_err());
    }

    #[test]
    fn validate_output_file_rejects_system_directory() {
        assert!(PathValidator::validate_output_file("/etc/requirements.txt").is_err());
    }
}
