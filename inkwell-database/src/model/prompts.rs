use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type PromptId = u64;

/// Root document stored at `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub prompts: BTreeMap<PromptId, Prompt>,
    pub next_id: PromptId,
    #[serde(default)]
    pub today_prompt: Option<DailyPrompt>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: PromptId,
    pub text: String,
    #[serde(default)]
    pub has_been_daily: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_submissions",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub submissions: Vec<Option<Submission>>,
}

impl Prompt {
    pub fn new(id: PromptId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            has_been_daily: false,
            submissions: Vec::new(),
        }
    }

    /// Present submissions with their stored index. Empty slots are skipped.
    pub fn submission_entries(&self) -> impl Iterator<Item = (usize, &Submission)> {
        self.submissions
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|submission| (index, submission)))
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.iter().flatten().count()
    }

    /// One past the highest stored index.
    pub fn next_submission_index(&self) -> usize {
        self.submissions.len()
    }

    pub fn push_submission(&mut self, submission: Submission) {
        self.submissions.push(Some(submission));
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub link: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

impl Submission {
    pub fn new(link: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            author: author.into(),
            date: Utc::now(),
        }
    }
}

/// Marker for the prompt chosen as today's and when it was chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPrompt {
    pub date: DateTime<Utc>,
    pub prompt_id: PromptId,
}

pub fn prompt_path(prompt_id: PromptId) -> String {
    format!("prompts/{prompt_id}")
}

pub fn submission_path(prompt_id: PromptId, index: usize) -> String {
    format!("prompts/{prompt_id}/submissions/{index}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionList {
    List(Vec<Option<Submission>>),
    Indexed(BTreeMap<String, Submission>),
}

/// Accept submissions stored as a list or as an object keyed by index.
///
/// Targeted writes to `.../submissions/N` produce the keyed form until the
/// next full-document write turns it back into a list. Slots keep their
/// stored index; gaps become `None` and trailing gaps are dropped.
fn deserialize_submissions<'de, D>(deserializer: D) -> Result<Vec<Option<Submission>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut slots = match Option::<SubmissionList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(SubmissionList::List(items)) => items,
        Some(SubmissionList::Indexed(entries)) => {
            let indexed: BTreeMap<usize, Submission> = entries
                .into_iter()
                .filter_map(|(key, submission)| {
                    key.parse::<usize>().ok().map(|index| (index, submission))
                })
                .collect();

            let len = indexed.keys().next_back().map_or(0, |last| last + 1);
            let mut slots: Vec<Option<Submission>> = vec![None; len];
            for (index, submission) in indexed {
                slots[index] = Some(submission);
            }
            slots
        }
    };

    while matches!(slots.last(), Some(None)) {
        slots.pop();
    }

    Ok(slots)
}
