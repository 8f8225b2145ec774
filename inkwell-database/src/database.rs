use anyhow::Context as _;
use tracing::info;

use crate::model::prompts::PromptDocument;
use crate::queue::JobQueue;
use crate::schema::{LoadedDocument, initialize_document};
use crate::store::{DocumentStore, ROOT_PATH};

/// Shared repository handle passed across crates.
///
/// Clones share the same store and the same job queue.
#[derive(Clone, Debug)]
pub struct Database {
    store: DocumentStore,
    queue: JobQueue,
}

impl Database {
    /// Create a handle with its own job queue. Must be called inside a tokio runtime.
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            queue: JobQueue::new(),
        }
    }

    /// Create a handle that serializes its jobs on an existing queue.
    pub fn with_queue(store: DocumentStore, queue: JobQueue) -> Self {
        Self { store, queue }
    }

    /// Expose the document store for query modules.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Expose the job queue for query modules.
    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    /// Read the root document. Migrations are applied in memory only.
    pub(crate) async fn read_document(&self) -> anyhow::Result<PromptDocument> {
        let raw = self
            .store
            .read(ROOT_PATH)
            .await
            .context("failed to read prompt document")?;

        Ok(initialize_document(raw)?.document)
    }

    /// Read the root document for a queued read-modify-write cycle.
    ///
    /// A migrated document is saved before returning so targeted sub-path
    /// writes land on the current shape. Only call from inside a queued job.
    pub(crate) async fn load_document_for_update(&self) -> anyhow::Result<PromptDocument> {
        let raw = self
            .store
            .read(ROOT_PATH)
            .await
            .context("failed to read prompt document")?;

        let LoadedDocument { document, migrated } = initialize_document(raw)?;
        if migrated {
            self.save_document(&document).await?;
            info!(
                schema_version = document.schema_version,
                "saved migrated prompt document"
            );
        }

        Ok(document)
    }

    pub(crate) async fn save_document(&self, document: &PromptDocument) -> anyhow::Result<()> {
        self.store
            .write_json(ROOT_PATH, document)
            .await
            .context("failed to write prompt document")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use super::Database;
    use crate::impls::prompts::{add_prompt, get_prompts};
    use crate::queue::JobQueue;
    use crate::store::DocumentStore;

    #[tokio::test]
    async fn handles_sharing_a_queue_run_one_after_another() {
        let queue = JobQueue::new();
        let first = Database::with_queue(DocumentStore::memory(), queue.clone());
        let second = Database::with_queue(DocumentStore::memory(), queue);
        let log = Arc::new(Mutex::new(Vec::new()));

        let slow = {
            let log = log.clone();
            first.queue().enqueue(async move {
                log.lock().await.push("first:start");
                tokio::time::sleep(Duration::from_millis(30)).await;
                log.lock().await.push("first:end");
                Ok(())
            })
        };
        let fast = {
            let log = log.clone();
            second.queue().enqueue(async move {
                log.lock().await.push("second");
                Ok(())
            })
        };

        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        assert_eq!(*log.lock().await, vec!["first:start", "first:end", "second"]);
    }

    #[tokio::test]
    async fn shared_queue_keeps_stores_separate() {
        let queue = JobQueue::new();
        let first = Database::with_queue(DocumentStore::memory(), queue.clone());
        let second = Database::with_queue(DocumentStore::memory(), queue);

        let (a, b) = tokio::join!(add_prompt(&first, "A"), add_prompt(&second, "B"));
        assert_eq!((a.unwrap(), b.unwrap()), (1, 1));

        assert_eq!(get_prompts(&first).await.unwrap()[&1].text, "A");
        assert_eq!(get_prompts(&second).await.unwrap()[&1].text, "B");
    }
}
