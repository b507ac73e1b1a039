//! Store Error Types
//!
//! Error types raised by store backends themselves. The abstract
//! [`crate::db::DocumentStore`] trait reports failures through
//! `anyhow::Error`, so backends attach whatever concrete error fits;
//! these are the ones the in-memory reference backend produces.

use thiserror::Error;

/// Storage-level operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert with an id that already exists
    #[error("Duplicate node id: {id}")]
    DuplicateId { id: String },
}

impl StoreError {
    /// Create a duplicate id error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}
