//! Service layer for the dossier case backend.
//!
//! This crate orchestrates the crates below it into the operations the
//! request layer calls:
//! - [`CaseService`] — lookup-records-access and recency-ordered listing
//! - [`FileStorageCoordinator`] — batch uploads and deletes across the
//!   filesystem and the metadata store
//! - [`FileNameAllocator`] — stored names free in both stores
//!
//! HTTP routing lives outside this workspace; these types are its interface.

pub mod error;
pub mod files;
pub mod naming;
pub mod page;
pub mod recent;

pub use error::{ServiceError, ServiceResult};
pub use files::{BatchOutcome, CaseDraft, FileStorageCoordinator};
pub use naming::FileNameAllocator;
pub use page::Page;
pub use recent::CaseService;
