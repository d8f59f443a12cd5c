use futures::stream::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// A single unit of background work plus the channel its outcome is
/// reported on.
pub struct ProcessJob {
    user: String,
    respond_to: oneshot::Sender<Result<(), StoreError>>,
}

impl ProcessJob {
    async fn execute(&mut self) -> Result<(), StoreError> {
        // The processing step itself; kept deliberately small.
        tokio::task::yield_now().await;
        info!(user = %self.user, "processing");
        Ok(())
    }

    fn complete(self, result: Result<(), StoreError>) {
        if self.respond_to.send(result).is_err() {
            debug!(user = %self.user, "caller dropped its ticket before completion");
        }
    }
}

/// Completion handle for one submitted job.
pub struct JobTicket {
    done: oneshot::Receiver<Result<(), StoreError>>,
}

impl JobTicket {
    /// Wait for the job to finish. A dropped worker surfaces as an error
    /// rather than hanging the caller.
    pub async fn wait(self) -> Result<(), StoreError> {
        self.done
            .await
            .map_err(|_| StoreError::worker("completion channel closed"))?
    }
}

/// Bounded background pool: jobs queue in a bounded channel and run with
/// fixed concurrency. Completion order across jobs is unspecified.
pub struct ProcessingPool {
    job_tx: mpsc::Sender<ProcessJob>,
    supervisor: JoinHandle<()>,
}

impl ProcessingPool {
    pub fn spawn(concurrency: usize, queue_depth: usize) -> Self {
        let concurrency = concurrency.max(1);
        let (job_tx, job_rx) = mpsc::channel::<ProcessJob>(queue_depth.max(1));

        let supervisor = tokio::spawn(async move {
            info!(concurrency, "Processing Pipeline Started");

            let mut pipeline = ReceiverStream::new(job_rx)
                .map(|mut job| async move {
                    let result = job.execute().await;
                    job.complete(result);
                })
                .buffer_unordered(concurrency);

            while pipeline.next().await.is_some() {}
            info!("Processing Pipeline Stopped");
        });

        Self { job_tx, supervisor }
    }

    /// Enqueue a job for `user`. Applies backpressure when the queue is
    /// full; a closed queue is an error, not a panic.
    pub async fn submit(&self, user: impl Into<String>) -> Result<JobTicket, StoreError> {
        let (tx_done, rx_done) = oneshot::channel();
        self.job_tx
            .send(ProcessJob {
                user: user.into(),
                respond_to: tx_done,
            })
            .await
            .map_err(|_| StoreError::worker("job queue closed"))?;
        Ok(JobTicket { done: rx_done })
    }

    /// Close the queue and wait for in-flight jobs to drain.
    pub async fn shutdown(self) {
        drop(self.job_tx);
        if let Err(e) = self.supervisor.await {
            warn!("processing supervisor join failed: {}", e);
        }
    }
}
