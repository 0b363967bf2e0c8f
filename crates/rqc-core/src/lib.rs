//! Core types and traits for RQC (RAG Query Console)
//!
//! This crate defines the error taxonomy, the wire types exchanged with the
//! RAG backend (ingestion jobs, upload payloads, query results), and the
//! backend traits the workflows are written against, making the system
//! test-friendly without a live backend.

pub mod backend;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use backend::{IngestBackend, QueryBackend};
pub use error::{Error, Result};
pub use types::*;
