use crate::error::ValidationError;
use std::path::{Path, PathBuf};

pub const ACCEPTED_EXTENSIONS: &[&str] = &[".txt", ".pdf"];

/// A file chosen by the user. Only the name is inspected before submission;
/// the content is read when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub path: PathBuf,
    pub name: String,
}

impl FileRef {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Returns the trimmed text, or `EmptyInput` if nothing is left.
pub fn validate_text_submission(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

pub fn validate_file_selection(file: FileRef) -> Result<FileRef, ValidationError> {
    let name = file.name.to_lowercase();
    if ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Ok(file)
    } else {
        Err(ValidationError::UnsupportedExtension)
    }
}
