//! Upload workflow state machine
//!
//! Drives a document from selection through upload and, when the backend
//! answers with a job identifier, into status tracking. The workflow owns
//! the phase transitions; rendering and input stay with the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use rqc_core::{Error, IngestBackend, IngestJob, IngestState, Result, UploadResponse};

use crate::poll::{JobPoller, PollConfig, PollHandle};
use crate::validate::validate_document;

/// Where the workflow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// No request in flight; a document may or may not be selected
    Idle,
    /// Upload request in flight
    Uploading,
    /// Upload accepted with a job id; status polling is active
    Tracking,
    /// Last submission finished successfully
    Done,
    /// Last submission ended in an error
    Failed,
}

/// Outcome of a submission
#[derive(Debug)]
pub enum Submission {
    /// The backend ingested the document synchronously
    Completed(UploadResponse),
    /// The backend queued an ingestion job; poll the handle for progress
    Queued(PollHandle),
}

/// State machine for the document ingestion flow.
///
/// One workflow tracks one submission at a time. A rejected selection keeps
/// the previously selected document, so a typo never discards valid state.
pub struct UploadWorkflow<B>
where
    B: IngestBackend + 'static,
{
    backend: Arc<B>,
    poll_config: PollConfig,
    phase: UploadPhase,
    selected: Option<PathBuf>,
    metadata: Option<Value>,
    error: Option<String>,
    last_result: Option<Value>,
}

impl<B> UploadWorkflow<B>
where
    B: IngestBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_poll_config(backend, PollConfig::default())
    }

    pub fn with_poll_config(backend: Arc<B>, poll_config: PollConfig) -> Self {
        Self {
            backend,
            poll_config,
            phase: UploadPhase::Idle,
            selected: None,
            metadata: None,
            error: None,
            last_result: None,
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Attach metadata to the next submission
    pub fn set_metadata(&mut self, metadata: Option<Value>) {
        self.metadata = metadata;
    }

    /// Select a document for upload.
    ///
    /// The path is checked against the extension allow-list before it
    /// replaces the current selection. On rejection the previous selection
    /// survives and the rejection message is recorded.
    pub fn select(&mut self, path: &Path) -> Result<()> {
        match validate_document(path) {
            Ok(_) => {
                self.selected = Some(path.to_path_buf());
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Upload the selected document.
    ///
    /// A response carrying a job id moves the workflow into `Tracking` and
    /// starts the poll loop; a response without one is a synchronous
    /// completion and finishes the submission immediately.
    pub async fn submit(&mut self) -> Result<Submission> {
        let path = self
            .selected
            .clone()
            .ok_or_else(|| Error::InvalidInput("No document selected".to_string()))?;

        self.phase = UploadPhase::Uploading;
        self.error = None;
        self.last_result = None;

        let response = match self.backend.upload(&path, self.metadata.as_ref()).await {
            Ok(response) => response,
            Err(err) => {
                self.phase = UploadPhase::Failed;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        match response.job_id.clone() {
            Some(job_id) => {
                self.phase = UploadPhase::Tracking;
                let handle = JobPoller::spawn(
                    self.backend.clone(),
                    IngestJob::new(job_id),
                    self.poll_config.clone(),
                );
                Ok(Submission::Queued(handle))
            }
            None => {
                self.phase = UploadPhase::Done;
                self.selected = None;
                self.last_result = serde_json::to_value(&response).ok();
                Ok(Submission::Completed(response))
            }
        }
    }

    /// Wait for a queued submission's poll loop and record its outcome.
    ///
    /// A job that ends in the `failed` state is returned as `Ok`: the
    /// protocol ran to completion even though ingestion did not.
    pub async fn finish(&mut self, handle: PollHandle) -> Result<IngestJob> {
        match handle.wait().await {
            Ok(job) => {
                if job.state == IngestState::Failed {
                    self.phase = UploadPhase::Failed;
                    self.error = Some(
                        job.message
                            .clone()
                            .unwrap_or_else(|| "Ingestion failed".to_string()),
                    );
                } else {
                    self.phase = UploadPhase::Done;
                    self.selected = None;
                    self.last_result = serde_json::to_value(&job).ok();
                }
                Ok(job)
            }
            Err(err) => {
                self.phase = UploadPhase::Failed;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the workflow back to `Idle`.
    ///
    /// Refused while an upload request is in flight; a tracked job can be
    /// abandoned by dropping its handle first.
    pub fn reset(&mut self) -> Result<()> {
        if self.phase == UploadPhase::Uploading {
            return Err(Error::InvalidInput(
                "Cannot reset while an upload is in flight".to_string(),
            ));
        }

        self.phase = UploadPhase::Idle;
        self.selected = None;
        self.metadata = None;
        self.error = None;
        self.last_result = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use rqc_core::StatusReport;

    struct StubBackend {
        upload_response: Mutex<Option<Result<UploadResponse>>>,
        status_script: Mutex<VecDeque<Result<StatusReport>>>,
        upload_calls: AtomicUsize,
        status_calls: AtomicUsize,
        seen_metadata: Mutex<Option<Value>>,
    }

    impl StubBackend {
        fn new(
            upload_response: Result<UploadResponse>,
            status_script: Vec<Result<StatusReport>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                upload_response: Mutex::new(Some(upload_response)),
                status_script: Mutex::new(status_script.into_iter().collect()),
                upload_calls: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
                seen_metadata: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl IngestBackend for StubBackend {
        async fn upload(&self, _path: &Path, metadata: Option<&Value>) -> Result<UploadResponse> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_metadata.lock().unwrap() = metadata.cloned();
            self.upload_response
                .lock()
                .unwrap()
                .take()
                .expect("upload called more than once")
        }

        async fn status(&self, _job_id: &str) -> Result<StatusReport> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.status_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Ok(StatusReport {
                        state: IngestState::Queued,
                        progress: None,
                        message: None,
                    })
                })
        }
    }

    fn upload_response(job_id: Option<&str>, message: Option<&str>) -> UploadResponse {
        UploadResponse {
            job_id: job_id.map(str::to_string),
            message: message.map(str::to_string),
            extra: Default::default(),
        }
    }

    fn fast_poll() -> PollConfig {
        PollConfig {
            initial_delay: Duration::from_millis(5),
            interval: Duration::from_millis(5),
            max_transport_failures: 3,
        }
    }

    fn workspace_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"contents").unwrap();
        path
    }

    #[tokio::test]
    async fn rejected_selection_keeps_the_previous_document() {
        let backend = StubBackend::new(Ok(upload_response(None, None)), vec![]);
        let mut workflow = UploadWorkflow::new(backend);

        let dir = tempfile::tempdir().unwrap();
        let good = workspace_file(&dir, "report.pdf");
        workflow.select(&good).unwrap();

        let err = workflow.select(Path::new("image.png")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        assert_eq!(workflow.selected(), Some(good.as_path()));
        assert!(workflow.error().unwrap().contains(".png"));
    }

    #[tokio::test]
    async fn submit_without_selection_makes_no_network_call() {
        let backend = StubBackend::new(Ok(upload_response(None, None)), vec![]);
        let mut workflow = UploadWorkflow::new(backend.clone());

        let err = workflow.submit().await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(backend.upload_calls.load(Ordering::SeqCst), 0);
        assert_eq!(workflow.phase(), UploadPhase::Idle);
    }

    #[tokio::test]
    async fn synchronous_completion_skips_polling() {
        let backend = StubBackend::new(
            Ok(upload_response(None, Some("ingested 3 chunks"))),
            vec![],
        );
        let mut workflow = UploadWorkflow::new(backend.clone());

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "notes.txt")).unwrap();

        match workflow.submit().await.unwrap() {
            Submission::Completed(response) => {
                assert_eq!(response.message.as_deref(), Some("ingested 3 chunks"));
            }
            Submission::Queued(_) => panic!("expected a synchronous completion"),
        }

        assert_eq!(workflow.phase(), UploadPhase::Done);
        assert_eq!(workflow.selected(), None);
        assert!(workflow.last_result().is_some());
        assert_eq!(backend.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn queued_job_is_tracked_to_completion() {
        let backend = StubBackend::new(
            Ok(upload_response(Some("job-7"), None)),
            vec![Ok(StatusReport {
                state: IngestState::Completed,
                progress: Some(100.0),
                message: Some("done".to_string()),
            })],
        );
        let mut workflow = UploadWorkflow::with_poll_config(backend.clone(), fast_poll());

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "table.csv")).unwrap();

        let handle = match workflow.submit().await.unwrap() {
            Submission::Queued(handle) => handle,
            Submission::Completed(_) => panic!("expected a queued job"),
        };
        assert_eq!(workflow.phase(), UploadPhase::Tracking);

        let job = workflow.finish(handle).await.unwrap();
        assert_eq!(job.job_id, "job-7");
        assert_eq!(job.state, IngestState::Completed);
        assert_eq!(workflow.phase(), UploadPhase::Done);
        assert_eq!(workflow.selected(), None);
    }

    #[tokio::test]
    async fn failed_job_records_the_backend_message() {
        let backend = StubBackend::new(
            Ok(upload_response(Some("job-7"), None)),
            vec![Ok(StatusReport {
                state: IngestState::Failed,
                progress: None,
                message: Some("parser rejected page 4".to_string()),
            })],
        );
        let mut workflow = UploadWorkflow::with_poll_config(backend, fast_poll());

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "sheet.xlsx")).unwrap();

        let handle = match workflow.submit().await.unwrap() {
            Submission::Queued(handle) => handle,
            Submission::Completed(_) => panic!("expected a queued job"),
        };

        let job = workflow.finish(handle).await.unwrap();
        assert_eq!(job.state, IngestState::Failed);
        assert_eq!(workflow.phase(), UploadPhase::Failed);
        assert_eq!(workflow.error(), Some("parser rejected page 4"));
    }

    #[tokio::test]
    async fn upload_errors_move_the_workflow_to_failed() {
        let backend = StubBackend::new(
            Err(Error::Api {
                status: 415,
                message: "Unsupported file type".to_string(),
                body: serde_json::json!({}),
            }),
            vec![],
        );
        let mut workflow = UploadWorkflow::new(backend);

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "notes.docx")).unwrap();

        workflow.submit().await.unwrap_err();
        assert_eq!(workflow.phase(), UploadPhase::Failed);
        assert!(workflow.error().unwrap().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn metadata_travels_with_the_upload() {
        let backend = StubBackend::new(Ok(upload_response(None, None)), vec![]);
        let mut workflow = UploadWorkflow::new(backend.clone());

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "report.pdf")).unwrap();
        workflow.set_metadata(Some(serde_json::json!({ "team": "search" })));

        workflow.submit().await.unwrap();
        assert_eq!(
            *backend.seen_metadata.lock().unwrap(),
            Some(serde_json::json!({ "team": "search" }))
        );
    }

    #[tokio::test]
    async fn reset_clears_everything_except_mid_upload() {
        let backend = StubBackend::new(Ok(upload_response(None, None)), vec![]);
        let mut workflow = UploadWorkflow::new(backend);

        let dir = tempfile::tempdir().unwrap();
        workflow.select(&workspace_file(&dir, "report.pdf")).unwrap();
        workflow.set_metadata(Some(serde_json::json!({ "k": "v" })));
        workflow.submit().await.unwrap();

        workflow.reset().unwrap();
        assert_eq!(workflow.phase(), UploadPhase::Idle);
        assert_eq!(workflow.selected(), None);
        assert_eq!(workflow.error(), None);
        assert_eq!(workflow.last_result(), None);
    }
}
