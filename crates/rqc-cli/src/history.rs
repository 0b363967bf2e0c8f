//! Persistent record of finished ingestions
//!
//! Completed and failed uploads are appended to a JSON file, newest last.
//! The file backs the sources screen's "last upload" display across runs.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;

use rqc_core::{Error, IngestState, Result};

/// History file name used when no explicit path is configured
pub const DEFAULT_HISTORY_FILE: &str = "rqc_history.json";

/// One finished ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRecord {
    pub file_name: String,
    /// Absent for synchronous completions, which never get a job id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub state: IngestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: i64,
}

impl IngestRecord {
    pub fn new(
        file_name: impl Into<String>,
        job_id: Option<String>,
        state: IngestState,
        message: Option<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            job_id,
            state,
            message,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Append-only ingestion history backed by a JSON file
pub struct IngestHistory {
    records: Vec<IngestRecord>,
    file_path: PathBuf,
}

impl IngestHistory {
    /// Open the history at `file_path`, loading any existing records.
    ///
    /// An unreadable or malformed file is reported as a warning and treated
    /// as empty; a broken history never blocks the console from starting.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let mut history = Self {
            records: Vec::new(),
            file_path: file_path.into(),
        };

        if Path::new(&history.file_path).exists() {
            if let Err(err) = history.load_sync() {
                eprintln!("Warning: failed to load ingest history: {}", err);
            }
        }

        history
    }

    fn load_sync(&mut self) -> Result<()> {
        let content = std::fs::read_to_string(&self.file_path)?;
        self.records =
            serde_json::from_str(&content).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(())
    }

    /// Write all records back to the history file
    pub async fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }

    /// Append a record and persist immediately
    pub async fn record(&mut self, record: IngestRecord) -> Result<()> {
        self.records.push(record);
        self.save().await
    }

    /// All records, oldest first
    pub fn entries(&self) -> &[IngestRecord] {
        &self.records
    }

    /// The most recently recorded ingestion
    pub fn last(&self) -> Option<&IngestRecord> {
        self.records.last()
    }
}
