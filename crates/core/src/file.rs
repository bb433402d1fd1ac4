//! Uploaded file payloads and file-name handling.

use bytes::Bytes;

/// An uploaded file as received from the request layer.
///
/// The name and content type are user-supplied and untrusted; the validation
/// policy and the name allocator decide what actually reaches the stores.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    /// User-supplied file name (may be empty for malformed uploads).
    pub name: String,
    /// Declared content type, if the client sent one.
    pub content_type: Option<String>,
    /// File payload.
    pub data: Bytes,
}

impl UploadedFile {
    /// Convenience constructor for a named payload without a content type.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Set the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowercased extension of the user-supplied name, if any.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

/// Split a file name into `(stem, extension)` at the last dot.
///
/// `"report.pdf"` yields `("report", Some("pdf"))`; a name without a dot
/// yields the whole name as the stem. The extension is lowercased, matching
/// how it is stored and compared against the allow-list.
pub fn split_file_name(name: &str) -> (&str, Option<String>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            (stem, Some(ext.to_ascii_lowercase()))
        }
        _ => (name, None),
    }
}

/// Lowercased extension of a file name, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    split_file_name(name).1
}
