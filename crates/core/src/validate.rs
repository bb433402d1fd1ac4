//! Upload validation policy.
//!
//! Every file in a batch passes through this gate before anything is written.
//! A rejection here is per-file: it never aborts sibling files.

use crate::file::{UploadedFile, file_extension};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an uploaded file was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file is empty")]
    Empty,

    #[error("file name is missing")]
    MissingName,

    #[error("file size {size} exceeds limit of {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("extension '{0}' is not allowed")]
    ExtensionNotAllowed(String),

    #[error("content type '{actual}' does not match expected '{expected}'")]
    ContentTypeMismatch { expected: String, actual: String },
}

/// How strictly declared content types are checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrictness {
    /// Only the file extension is checked against the allow-list.
    #[default]
    ExtensionOnly,
    /// The declared content type must also match the extension's canonical
    /// MIME type. Files without a declared content type are rejected.
    RequireContentType,
}

/// Validation policy for uploaded case files.
#[derive(Clone, Debug)]
pub struct ValidationPolicy {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
    strictness: ValidationStrictness,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_file_size: crate::DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: crate::DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            strictness: ValidationStrictness::ExtensionOnly,
        }
    }
}

impl ValidationPolicy {
    /// Build a policy from explicit settings. Extensions are lowercased.
    pub fn new(
        max_file_size: u64,
        allowed_extensions: impl IntoIterator<Item = String>,
        strictness: ValidationStrictness,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
            strictness,
        }
    }

    /// Maximum accepted file size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check a single uploaded file against the policy.
    pub fn validate(&self, file: &UploadedFile) -> Result<(), ValidationError> {
        if file.is_empty() {
            return Err(ValidationError::Empty);
        }

        if file.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if file.size() > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                max: self.max_file_size,
            });
        }

        let extension = file_extension(&file.name)
            .ok_or_else(|| ValidationError::ExtensionNotAllowed(String::new()))?;
        if !self.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(ValidationError::ExtensionNotAllowed(extension));
        }

        if self.strictness == ValidationStrictness::RequireContentType {
            let expected = canonical_content_type(&extension);
            let actual = file.content_type.as_deref().unwrap_or("");
            if actual != expected {
                return Err(ValidationError::ContentTypeMismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Canonical MIME type for an allowed extension.
///
/// Extensions outside the default allow-list map to `application/octet-stream`,
/// which in practice means strict mode only accepts them when the client
/// declares exactly that.
pub fn canonical_content_type(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}
