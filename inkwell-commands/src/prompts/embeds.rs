use poise::serenity_prelude as serenity;

use inkwell_database::model::prompts::{Prompt, Submission};
use inkwell_utils::embed::build_embed;
use inkwell_utils::formatting::{
    EMBED_DESCRIPTION_LIMIT, escape_mentions, format_prompt_label, truncate_chars,
};

pub fn usage_message(usage: &str) -> String {
    format!("Invalid command. Usage: `{}`", usage)
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn moderator_only_message() -> &'static str {
    "You must be a mod or admin to use this command."
}

pub fn no_daily_prompt_message() -> &'static str {
    "Sorry, but I'm fresh out of new prompts!"
}

pub fn no_prompts_message() -> &'static str {
    "Sorry, but there are no prompts right now."
}

pub fn unknown_prompt_message(prompt_id: u64) -> String {
    format!("There is no {}.", format_prompt_label(prompt_id))
}

pub fn no_submissions_message(prompt_id: u64) -> String {
    format!(
        "There are no submissions for {} yet.",
        format_prompt_label(prompt_id)
    )
}

pub fn submission_thanks_message(prompt_id: u64) -> String {
    format!(
        "Thanks for your submission to {}!",
        format_prompt_label(prompt_id)
    )
}

pub fn prompt_added_message(prompt_id: u64) -> String {
    format!("Prompt added as #{}!", prompt_id)
}

pub fn prompt_add_failed_message() -> &'static str {
    "There was an issue adding your prompt."
}

pub fn not_implemented_message() -> &'static str {
    "Sorry, but this feature is not implemented yet."
}

pub fn prompt_embed(title: &str, prompt: &Prompt) -> serenity::CreateEmbed {
    let footer = submission_count_footer(prompt.submission_count());
    build_embed(
        &format!("{} (#{})", title, prompt.id),
        truncate_chars(&escape_mentions(&prompt.text), EMBED_DESCRIPTION_LIMIT),
        Some(&footer),
    )
}

pub fn submissions_embed(prompt: &Prompt) -> serenity::CreateEmbed {
    build_embed(
        &format!("Submissions for prompt #{}", prompt.id),
        submissions_listing(prompt),
        Some(&submission_count_footer(prompt.submission_count())),
    )
}

/// Render the prompt text followed by one `#index: link` line per submission.
pub fn submissions_listing(prompt: &Prompt) -> String {
    let mut out = format!("_{}_\n", escape_mentions(&prompt.text));

    for (index, submission) in prompt.submission_entries() {
        out.push('\n');
        out.push_str(&submission_line(index, submission));
    }

    truncate_chars(out.trim_end(), EMBED_DESCRIPTION_LIMIT)
}

fn submission_line(index: usize, submission: &Submission) -> String {
    match submission.author.parse::<u64>() {
        Ok(user_id) => format!("#{}: {} by <@{}>", index, submission.link, user_id),
        Err(_) => format!("#{}: {}", index, submission.link),
    }
}

fn submission_count_footer(count: usize) -> String {
    match count {
        1 => "1 submission".to_owned(),
        n => format!("{} submissions", n),
    }
}
