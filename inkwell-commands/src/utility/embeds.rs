use std::time::Duration;

use crate::{COMMANDS, CommandMeta};

pub fn pong_message(store_backend: &str, latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!(
            "Pong! Gateway {} ms, prompts in the {} store.",
            latency.as_millis(),
            store_backend
        ),
        None => format!("Pong! Prompts in the {} store.", store_backend),
    }
}

/// Reply for `!usage`. Accepts names with or without the `!` prefix.
pub fn usage_reply(raw_name: Option<&str>) -> String {
    let lookup = raw_name
        .map(|name| name.trim().trim_start_matches('!').to_ascii_lowercase())
        .filter(|name| !name.is_empty());

    let Some(lookup) = lookup else {
        return format!("Usage: `{}`", super::usage::META.usage);
    };

    match COMMANDS.iter().find(|command| command.name == lookup) {
        Some(command) => format!("Usage: `{}`\n{}", command.usage, command.desc),
        None => format!("There is no `!{}` command. Try `!help`.", lookup),
    }
}

pub fn unknown_category_message(wanted_category: &str, valid_categories: &[&str]) -> String {
    let valid = valid_categories
        .iter()
        .map(|category| display_category(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Unknown category: {}\nValid categories: {}",
        display_category(wanted_category),
        valid
    )
}

pub fn no_commands_message(category: Option<&str>) -> String {
    match category {
        Some(cat) => format!("No commands found in category: {}", display_category(cat)),
        None => "No commands found at all. (This probably means something is broken)".to_owned(),
    }
}

pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}`: {}\n", command.usage, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
