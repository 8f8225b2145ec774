use anyhow::Context as _;
use tracing::debug;

use crate::database::Database;
use crate::model::prompts::{PromptId, Submission, submission_path};

/// Append a submission to a prompt. Returns `false` if the prompt does not exist.
///
/// The new entry is written one past the highest stored index with a single
/// targeted write; the rest of the document is left alone.
pub async fn add_submission_to_prompt(
    db: &Database,
    prompt_id: PromptId,
    author: &str,
    link: &str,
) -> anyhow::Result<bool> {
    let submission = Submission::new(link, author);
    let job_db = db.clone();

    db.queue()
        .enqueue(async move {
            let document = job_db.load_document_for_update().await?;
            let Some(prompt) = document.prompts.get(&prompt_id) else {
                debug!(prompt_id, "submission target does not exist");
                return Ok(false);
            };

            let index = prompt.next_submission_index();
            job_db
                .store()
                .write_json(&submission_path(prompt_id, index), &submission)
                .await
                .with_context(|| {
                    format!("failed to store submission #{index} for prompt #{prompt_id}")
                })?;

            debug!(prompt_id, index, "submission added");
            Ok(true)
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::add_submission_to_prompt;
    use crate::database::Database;
    use crate::impls::daily::get_daily_prompt_at;
    use crate::impls::prompts::{add_prompt, get_prompt};
    use crate::store::{DocumentStore, ROOT_PATH};

    async fn db_with_prompt() -> Database {
        let db = Database::new(DocumentStore::memory());
        add_prompt(&db, "Write about a lighthouse.").await.unwrap();
        db
    }

    #[tokio::test]
    async fn missing_prompt_is_reported_without_changes() {
        let db = db_with_prompt().await;
        let before = db.store().read(ROOT_PATH).await.unwrap();

        let added = add_submission_to_prompt(&db, 7, "userX", "https://example.com/a")
            .await
            .unwrap();

        assert!(!added);
        assert_eq!(db.store().read(ROOT_PATH).await.unwrap(), before);
    }

    #[tokio::test]
    async fn missing_prompt_on_empty_store_creates_nothing() {
        let db = Database::new(DocumentStore::memory());
        let added = add_submission_to_prompt(&db, 1, "userX", "https://example.com/a")
            .await
            .unwrap();

        assert!(!added);
        assert_eq!(db.store().read(ROOT_PATH).await.unwrap(), None);
    }

    #[tokio::test]
    async fn appends_in_insertion_order() {
        let db = db_with_prompt().await;

        assert!(add_submission_to_prompt(&db, 1, "userX", "https://example.com/a").await.unwrap());
        assert!(add_submission_to_prompt(&db, 1, "userY", "https://example.com/b").await.unwrap());

        let prompt = get_prompt(&db, 1).await.unwrap().unwrap();
        let entries: Vec<_> = prompt
            .submission_entries()
            .map(|(_, s)| (s.link.as_str(), s.author.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("https://example.com/a", "userX"),
                ("https://example.com/b", "userY")
            ]
        );

        assert!(db.store().read("prompts/1/submissions/0").await.unwrap().is_some());
        assert!(db.store().read("prompts/1/submissions/1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_submissions_get_contiguous_indices() {
        let db = db_with_prompt().await;

        let handles: Vec<_> = (0..16)
            .map(|index| {
                let db = db.clone();
                tokio::spawn(async move {
                    add_submission_to_prompt(
                        &db,
                        1,
                        &format!("user{index}"),
                        &format!("https://example.com/{index}"),
                    )
                    .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        for index in 0..16 {
            let path = format!("prompts/1/submissions/{index}");
            assert!(db.store().read(&path).await.unwrap().is_some(), "gap at {index}");
        }
        assert!(db.store().read("prompts/1/submissions/16").await.unwrap().is_none());

        let prompt = get_prompt(&db, 1).await.unwrap().unwrap();
        let links: BTreeSet<_> = prompt
            .submission_entries()
            .map(|(_, s)| s.link.clone())
            .collect();
        assert_eq!(links.len(), 16);
    }

    #[tokio::test]
    async fn submissions_survive_full_document_rewrites() {
        let db = Database::new(DocumentStore::memory());
        add_prompt(&db, "A").await.unwrap();
        add_prompt(&db, "B").await.unwrap();

        add_submission_to_prompt(&db, 1, "userX", "https://example.com/a").await.unwrap();
        get_daily_prompt_at(&db, chrono::Local::now()).await.unwrap();
        add_submission_to_prompt(&db, 1, "userY", "https://example.com/b").await.unwrap();

        let prompt = get_prompt(&db, 1).await.unwrap().unwrap();
        assert!(prompt.has_been_daily);
        let authors: Vec<_> = prompt
            .submission_entries()
            .map(|(index, s)| (index, s.author.as_str()))
            .collect();
        assert_eq!(authors, vec![(0, "userX"), (1, "userY")]);
    }

    #[tokio::test]
    async fn stored_gap_is_not_overwritten() {
        let db = Database::new(DocumentStore::memory());
        let sub = |n: u32| {
            json!({ "link": format!("https://example.com/{n}"), "author": "u", "date": "2024-03-01T10:00:00Z" })
        };
        db.store()
            .write(
                ROOT_PATH,
                json!({
                    "schemaVersion": 1,
                    "prompts": { "1": { "id": 1, "text": "t", "submissions": [sub(0), null, sub(2)] } },
                    "nextId": 2,
                    "todayPrompt": null
                }),
            )
            .await
            .unwrap();

        assert!(add_submission_to_prompt(&db, 1, "v", "https://example.com/new").await.unwrap());

        let stored = db.store().read("prompts/1/submissions/2/link").await.unwrap();
        assert_eq!(stored, Some(json!("https://example.com/2")));

        let prompt = get_prompt(&db, 1).await.unwrap().unwrap();
        let entries: Vec<_> = prompt
            .submission_entries()
            .map(|(index, s)| (index, s.link.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                (0, "https://example.com/0"),
                (2, "https://example.com/2"),
                (3, "https://example.com/new")
            ]
        );
    }
}
