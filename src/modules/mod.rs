//! Modules layer - Infrastructure components behind the feature layer
//!
//! Contains adapters for storage concerns like the on-disk upload store.

pub mod storage;
