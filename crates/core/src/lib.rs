//! Core domain types and shared logic for the dossier case backend.
//!
//! This crate defines the data model used across all other crates:
//! - Case numbers (the stable identifier every subsystem keys on)
//! - Uploaded file payloads and file-name handling
//! - The upload validation policy
//! - Configuration sections for storage, metadata, tracker and files

pub mod case;
pub mod config;
pub mod error;
pub mod file;
pub mod validate;

pub use case::CaseNumber;
pub use error::{Error, Result};
pub use file::{UploadedFile, file_extension, split_file_name};
pub use validate::{ValidationError, ValidationPolicy, ValidationStrictness};

/// Default maximum size of a single uploaded file: 100 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Default extension allow-list for uploaded case files.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "xlsx"];

/// File name of the recency snapshot when no explicit path is configured.
pub const SNAPSHOT_FILE_NAME: &str = "accessed_cases.json";
