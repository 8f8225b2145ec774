use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

type QueuedJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Serial executor for read-modify-write cycles against the shared document.
///
/// Jobs run one at a time in the order `enqueue` was called. The next job does
/// not start until the previous one has fully completed, including its store
/// I/O. A job that fails or panics does not stop the queue.
#[derive(Clone, Debug)]
pub struct JobQueue {
    sender: mpsc::UnboundedSender<QueuedJob>,
}

impl JobQueue {
    /// Spawn the queue worker. Must be called inside a tokio runtime.
    ///
    /// The worker exits once every clone of the queue has been dropped and
    /// the remaining jobs have drained.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(receiver));
        Self { sender }
    }

    /// Submit `job` behind every job enqueued before it.
    ///
    /// The job's position is fixed when this is called, not when the returned
    /// future is first polled. The returned future resolves to the job's own
    /// result.
    pub fn enqueue<F, T>(&self, job: F) -> impl Future<Output = anyhow::Result<T>> + Send + use<F, T>
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let queued: QueuedJob = Box::pin(async move {
            let _ = result_tx.send(job.await);
        });
        let submitted = self.sender.send(queued).is_ok();

        async move {
            if !submitted {
                anyhow::bail!("job queue worker has shut down");
            }

            result_rx
                .await
                .map_err(|_| anyhow::anyhow!("queued job stopped before producing a result"))?
        }
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_worker(mut receiver: mpsc::UnboundedReceiver<QueuedJob>) {
    let mut completed: u64 = 0;

    while let Some(job) = receiver.recv().await {
        // Spawned so a panicking job surfaces as a JoinError instead of killing the worker.
        if let Err(err) = tokio::spawn(job).await {
            error!(?err, "queued job panicked");
        }

        completed += 1;
        debug!(completed, "queued job finished");
    }

    debug!(completed, "job queue closed");
}
