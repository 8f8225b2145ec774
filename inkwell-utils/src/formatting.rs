/// Discord rejects embed descriptions above this many characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Format a prompt label (e.g., 5 -> "prompt #5").
pub fn format_prompt_label(prompt_id: u64) -> String {
    format!("prompt #{}", prompt_id)
}

/// Break user mentions so stored text cannot ping anyone when echoed back.
pub fn escape_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    if max_chars == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_mentions, format_prompt_label, truncate_chars};

    #[test]
    fn formats_prompt_labels() {
        assert_eq!(format_prompt_label(1), "prompt #1");
        assert_eq!(format_prompt_label(42), "prompt #42");
    }

    #[test]
    fn escapes_mentions() {
        assert_eq!(escape_mentions("hi @everyone"), "hi @\u{200B}everyone");
        assert_eq!(escape_mentions("no mentions"), "no mentions");
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly", 7), "exactly");
        assert_eq!(truncate_chars("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_chars("ééééé", 3), "éé…");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
