//! Wire and domain types for the ingestion and query endpoints

use serde::{Deserialize, Serialize};

/// Lifecycle of a server-side ingestion job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestState {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl IngestState {
    /// Terminal states are never polled past
    pub fn is_terminal(&self) -> bool {
        matches!(self, IngestState::Completed | IngestState::Failed)
    }
}

impl std::fmt::Display for IngestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IngestState::Queued => "queued",
            IngestState::Processing => "processing",
            IngestState::Completed => "completed",
            IngestState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One response from the job status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub state: IngestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Client-side merged view of an ingestion job.
///
/// The client never constructs job state on its own; it only folds status
/// reports into this record, newest report winning field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestJob {
    pub job_id: String,
    pub state: IngestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IngestJob {
    /// A freshly accepted job starts out queued
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            state: IngestState::Queued,
            progress: None,
            message: None,
        }
    }

    /// Merge a newer report over this record. The state is always taken from
    /// the report; `progress` and `message` overwrite only when the report
    /// carries them, otherwise the previously known values are retained.
    pub fn apply(&mut self, report: &StatusReport) {
        self.state = report.state;
        if let Some(progress) = report.progress {
            self.progress = Some(progress);
        }
        if let Some(message) = &report.message {
            self.message = Some(message.clone());
        }
    }
}

/// Payload returned by the upload endpoint.
///
/// The contract only promises an optional job identifier and message; any
/// other fields are preserved untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "jobId", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a query request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<serde_json::Value>,
}

/// A reference to a source document backing part of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Synthesized answer plus citations, kept in backend order.
///
/// No reordering, filtering, or deduplication happens anywhere on the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}
