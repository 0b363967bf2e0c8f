//! Client library for the RAG backend
//!
//! Wraps the backend's three HTTP endpoints (document upload, job status,
//! query) behind typed calls, and builds the two workflows on top of them:
//! an upload state machine with a cancellable fixed-interval poll loop, and
//! a single-shot validated query path.

mod config;
mod poll;
mod query;
mod transport;
mod validate;
mod workflow;


pub use config::BackendConfig;
pub use poll::{JobPoller, PollConfig, PollHandle};
pub use query::run_query;
pub use transport::RagClient;
pub use validate::{ACCEPTED_EXTENSIONS, parse_optional_json, validate_document};
pub use workflow::{Submission, UploadPhase, UploadWorkflow};

// Re-export core types for convenience
pub use rqc_core::{
    Citation, Error, IngestBackend, IngestJob, IngestState, QueryBackend, QueryRequest,
    QueryResult, Result, StatusReport, UploadResponse,
};
