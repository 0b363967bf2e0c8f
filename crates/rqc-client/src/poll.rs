//! Fixed-interval polling of ingestion job status
//!
//! After an upload returns a job identifier, the status endpoint is polled
//! until the job reaches a terminal state. Exactly one request is ever in
//! flight: the next poll is scheduled only after the previous response (or
//! error) has been handled, so responses are processed in request order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use rqc_core::{Error, IngestBackend, IngestJob, Result};

/// Timing and retry policy for the poll loop
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first status request
    pub initial_delay: Duration,
    /// Delay between handling one response and issuing the next request
    pub interval: Duration,
    /// Consecutive transport failures tolerated before abandoning the job
    pub max_transport_failures: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            interval: Duration::from_millis(1500),
            max_transport_failures: 3,
        }
    }
}

/// Spawns the polling task for an ingestion job
pub struct JobPoller;

impl JobPoller {
    /// Schedule the poll loop for `job` on the current runtime and return a
    /// cancellable handle to it.
    pub fn spawn<B>(backend: Arc<B>, job: IngestJob, config: PollConfig) -> PollHandle
    where
        B: IngestBackend + 'static,
    {
        let (updates, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(backend, job, config, updates));

        PollHandle {
            updates: receiver,
            task: Some(task),
        }
    }

    async fn run<B>(
        backend: Arc<B>,
        mut job: IngestJob,
        config: PollConfig,
        updates: mpsc::UnboundedSender<IngestJob>,
    ) -> Result<IngestJob>
    where
        B: IngestBackend + 'static,
    {
        let mut consecutive_failures = 0u32;

        tokio::time::sleep(config.initial_delay).await;

        loop {
            match backend.status(&job.job_id).await {
                Ok(report) => {
                    consecutive_failures = 0;
                    job.apply(&report);
                    // Receiver may already be gone; the loop still owns the job.
                    let _ = updates.send(job.clone());

                    if job.state.is_terminal() {
                        return Ok(job);
                    }
                }
                Err(err) => {
                    consecutive_failures += 1;
                    if consecutive_failures >= config.max_transport_failures {
                        return Err(err);
                    }
                }
            }

            tokio::time::sleep(config.interval).await;
        }
    }
}

/// Handle to a scheduled poll loop.
///
/// Dropping the handle aborts the task, so a pending poll scheduled by a
/// discarded owner never fires.
#[derive(Debug)]
pub struct PollHandle {
    updates: mpsc::UnboundedReceiver<IngestJob>,
    task: Option<JoinHandle<Result<IngestJob>>>,
}

impl PollHandle {
    /// Snapshot stream: one merged record per handled poll response. The
    /// channel closes once the loop stops.
    pub fn updates(&mut self) -> &mut mpsc::UnboundedReceiver<IngestJob> {
        &mut self.updates
    }

    /// Cancel the loop; no further status requests will be issued.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Wait for the loop to finish and return the final merged record.
    ///
    /// `Ok` carries the job in either terminal state; `Err` means polling was
    /// abandoned after repeated transport failures.
    pub async fn wait(mut self) -> Result<IngestJob> {
        let task = self
            .task
            .take()
            .ok_or_else(|| Error::Other("poll task already cancelled".to_string()))?;

        match task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => {
                Err(Error::Other("poll task cancelled".to_string()))
            }
            Err(err) => Err(Error::Other(format!("poll task panicked: {}", err))),
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
