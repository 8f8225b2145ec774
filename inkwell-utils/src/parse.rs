use url::Url;

/// Parse a user-supplied prompt number like `3` or `#3`. Zero is rejected.
pub fn parse_prompt_id(raw: &str) -> Option<u64> {
    let value = raw.trim();
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u64>().ok().filter(|id| *id > 0)
}

/// Parse a submission link. Only absolute `http`/`https` URLs are accepted.
pub fn parse_submission_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url),
        _ => None,
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
