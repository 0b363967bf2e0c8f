//! Backend traits at the transport seam
//!
//! Workflows are generic over these traits so they can be exercised against
//! scripted stubs instead of a live backend.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{QueryRequest, QueryResult, StatusReport, UploadResponse};

/// Document ingestion endpoints
#[async_trait]
pub trait IngestBackend: Send + Sync {
    /// Upload a document, optionally attaching a metadata object
    async fn upload(&self, path: &Path, metadata: Option<&Value>) -> Result<UploadResponse>;

    /// Fetch the current status of an ingestion job
    async fn status(&self, job_id: &str) -> Result<StatusReport>;
}

/// Query endpoint
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Submit a single query and return the synthesized answer with citations
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult>;
}
