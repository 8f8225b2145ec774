use std::collections::BTreeMap;

use anyhow::Context as _;
use tracing::debug;

use crate::database::Database;
use crate::model::prompts::{Prompt, PromptId, prompt_path};

/// Add a prompt and return its id.
///
/// The id is returned only after the full document write is acknowledged, so a
/// failed write consumes no id.
pub async fn add_prompt(db: &Database, text: &str) -> anyhow::Result<PromptId> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("prompt text cannot be empty");
    }

    let text = text.to_owned();
    let job_db = db.clone();
    db.queue()
        .enqueue(async move {
            let mut document = job_db.load_document_for_update().await?;
            let id = document.next_id;

            document.prompts.insert(id, Prompt::new(id, text));
            document.next_id = id.checked_add(1).context("prompt id space exhausted")?;

            job_db
                .save_document(&document)
                .await
                .with_context(|| format!("failed to persist prompt #{id}"))?;

            debug!(prompt_id = id, "prompt added");
            Ok(id)
        })
        .await
}

/// Delete a prompt by id. Removing a missing prompt is not an error.
pub async fn remove_prompt(db: &Database, prompt_id: PromptId) -> anyhow::Result<()> {
    let job_db = db.clone();
    db.queue()
        .enqueue(async move {
            job_db
                .store()
                .delete(&prompt_path(prompt_id))
                .await
                .with_context(|| format!("failed to remove prompt #{prompt_id}"))?;

            debug!(prompt_id, "prompt removed");
            Ok(())
        })
        .await
}

/// Snapshot of every prompt, ordered by id.
///
/// Not queued: the snapshot may predate writes that are still pending.
pub async fn get_prompts(db: &Database) -> anyhow::Result<BTreeMap<PromptId, Prompt>> {
    Ok(db.read_document().await?.prompts)
}

/// Look up a single prompt from an unqueued snapshot.
pub async fn get_prompt(db: &Database, prompt_id: PromptId) -> anyhow::Result<Option<Prompt>> {
    Ok(get_prompts(db).await?.remove(&prompt_id))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{add_prompt, get_prompt, get_prompts, remove_prompt};
    use crate::database::Database;
    use crate::store::{DocumentStore, ROOT_PATH};

    fn memory_db() -> Database {
        Database::new(DocumentStore::memory())
    }

    #[tokio::test]
    async fn assigns_sequential_ids_from_one() {
        let db = memory_db();

        let mut ids = Vec::new();
        for text in ["A", "B", "C", "D"] {
            ids.push(add_prompt(&db, text).await.unwrap());
        }

        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_removal() {
        let db = memory_db();

        assert_eq!(add_prompt(&db, "A").await.unwrap(), 1);
        assert_eq!(add_prompt(&db, "B").await.unwrap(), 2);
        remove_prompt(&db, 2).await.unwrap();
        assert_eq!(add_prompt(&db, "C").await.unwrap(), 3);
        remove_prompt(&db, 1).await.unwrap();
        remove_prompt(&db, 3).await.unwrap();
        assert_eq!(add_prompt(&db, "D").await.unwrap(), 4);

        let prompts = get_prompts(&db).await.unwrap();
        assert_eq!(prompts.keys().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[tokio::test]
    async fn concurrent_adds_get_distinct_ids() {
        let db = memory_db();

        let handles: Vec<_> = (0..10)
            .map(|index| {
                let db = db.clone();
                tokio::spawn(async move { add_prompt(&db, &format!("prompt {index}")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(get_prompts(&db).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn rejects_empty_text() {
        let db = memory_db();

        assert!(add_prompt(&db, "").await.is_err());
        assert!(add_prompt(&db, "   \n").await.is_err());
        assert_eq!(db.store().read(ROOT_PATH).await.unwrap(), None);
        assert_eq!(add_prompt(&db, "  real prompt ").await.unwrap(), 1);
        assert_eq!(get_prompt(&db, 1).await.unwrap().unwrap().text, "real prompt");
    }

    #[tokio::test]
    async fn writes_the_full_document_shape() {
        let db = memory_db();
        add_prompt(&db, "Some cool prompt.").await.unwrap();

        let root = db.store().read(ROOT_PATH).await.unwrap().unwrap();
        assert_eq!(
            root,
            json!({
                "schemaVersion": 1,
                "prompts": { "1": { "id": 1, "text": "Some cool prompt.", "hasBeenDaily": false } },
                "nextId": 2,
                "todayPrompt": null
            })
        );
    }

    #[tokio::test]
    async fn removing_missing_prompt_is_a_no_op() {
        let db = memory_db();
        remove_prompt(&db, 42).await.unwrap();

        add_prompt(&db, "A").await.unwrap();
        remove_prompt(&db, 42).await.unwrap();
        assert!(get_prompt(&db, 1).await.unwrap().is_some());
        assert!(get_prompt(&db, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fresh_store_has_no_prompts() {
        let db = memory_db();
        assert!(get_prompts(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn legacy_document_is_migrated_on_first_write() {
        let db = memory_db();
        db.store()
            .write(
                ROOT_PATH,
                json!({
                    "prompts": { "P1": { "id": 1, "text": "old", "hasBeenDaily": false, "submissions": null } },
                    "nextId": 2,
                    "todayPrompt": null
                }),
            )
            .await
            .unwrap();

        assert_eq!(get_prompt(&db, 1).await.unwrap().unwrap().text, "old");
        assert_eq!(add_prompt(&db, "new").await.unwrap(), 2);

        let root = db.store().read(ROOT_PATH).await.unwrap().unwrap();
        assert_eq!(root["schemaVersion"], 1);
        assert_eq!(root["prompts"]["1"]["text"], "old");
        assert_eq!(root["prompts"]["2"]["text"], "new");
        assert!(root["prompts"].get("P1").is_none());
    }
}
