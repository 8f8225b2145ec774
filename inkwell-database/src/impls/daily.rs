use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};

use crate::database::Database;
use crate::model::prompts::{DailyPrompt, Prompt, PromptDocument, PromptId};

/// Result of evaluating the daily rotation against a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DailySelection {
    /// Today's marker is still current. The document was not touched.
    Current(PromptId),
    /// A new prompt was picked. The document was updated and must be saved.
    Selected(PromptId),
    /// No unused prompt is left. The marker was cleared and must be saved.
    Exhausted,
}

/// Return today's prompt, picking the next one when the day has rolled over.
///
/// Returns `None` once every prompt has served as a daily prompt.
pub async fn get_daily_prompt(db: &Database) -> anyhow::Result<Option<Prompt>> {
    get_daily_prompt_at(db, Local::now()).await
}

/// Same as [`get_daily_prompt`] with an explicit clock reading.
pub async fn get_daily_prompt_at(
    db: &Database,
    now: DateTime<Local>,
) -> anyhow::Result<Option<Prompt>> {
    let job_db = db.clone();
    db.queue()
        .enqueue(async move {
            let mut document = job_db.load_document_for_update().await?;

            match select_daily_prompt(&mut document, now) {
                DailySelection::Current(prompt_id) => {
                    debug!(prompt_id, "daily prompt still current");
                    Ok(document.prompts.remove(&prompt_id))
                }
                DailySelection::Selected(prompt_id) => {
                    job_db.save_document(&document).await?;
                    info!(prompt_id, "rotated daily prompt");
                    Ok(document.prompts.remove(&prompt_id))
                }
                DailySelection::Exhausted => {
                    job_db.save_document(&document).await?;
                    info!("daily prompt pool exhausted");
                    Ok(None)
                }
            }
        })
        .await
}

/// Apply the rotation rules to `document` in memory.
///
/// The current marker is kept while it points at an existing prompt and was
/// set on the same local calendar day as `now`. Otherwise the scan resumes
/// after the last pick (or at id 1 with no marker) and takes the lowest id
/// below `next_id` whose prompt has not been daily yet, retrying from id 1
/// before reporting the pool as exhausted.
pub fn select_daily_prompt(document: &mut PromptDocument, now: DateTime<Local>) -> DailySelection {
    if let Some(marker) = &document.today_prompt
        && is_same_local_day(marker.date, now)
        && document.prompts.contains_key(&marker.prompt_id)
    {
        return DailySelection::Current(marker.prompt_id);
    }

    let resume_after = document
        .today_prompt
        .as_ref()
        .map_or(0, |marker| marker.prompt_id);

    let next = first_unused(document, resume_after.saturating_add(1))
        .or_else(|| first_unused(document, 1));

    let Some(prompt_id) = next else {
        document.today_prompt = None;
        return DailySelection::Exhausted;
    };

    if let Some(prompt) = document.prompts.get_mut(&prompt_id) {
        prompt.has_been_daily = true;
    }
    document.today_prompt = Some(DailyPrompt {
        date: now.with_timezone(&Utc),
        prompt_id,
    });

    DailySelection::Selected(prompt_id)
}

fn first_unused(document: &PromptDocument, start: PromptId) -> Option<PromptId> {
    if start >= document.next_id {
        return None;
    }

    document
        .prompts
        .range(start..document.next_id)
        .find(|(_, prompt)| !prompt.has_been_daily)
        .map(|(id, _)| *id)
}

/// Compare calendar dates in local wall-clock time, not elapsed hours.
pub fn is_same_local_day(stamp: DateTime<Utc>, now: DateTime<Local>) -> bool {
    stamp.with_timezone(&Local).date_naive() == now.date_naive()
}
