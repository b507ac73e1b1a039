//! Persistence Layer
//!
//! The document store underneath the hierarchy logic is an external
//! collaborator: the core only specifies the filters and field-set updates
//! it issues, never how a backend executes them. This module holds:
//!
//! - [`DocumentStore`] - the abstract async persistence trait
//! - [`MemoryStore`] - the in-memory reference backend used by tests and
//!   as the executable specification of filter semantics
//! - [`StoreError`] - errors produced by the reference backend

mod document_store;
mod error;
mod memory_store;

pub use document_store::DocumentStore;
pub use error::StoreError;
pub use memory_store::MemoryStore;
