//! Storage module for file management
//!
//! Provides the local disk store for uploaded question files,
//! organized as one directory per subject.

mod disk_store;

pub use disk_store::UploadStore;
