//! Repository traits for the metadata store.

pub mod case_files;
pub mod cases;

pub use case_files::CaseFileRepo;
pub use cases::CaseRepo;
