use chrono::{DateTime, Duration, Utc};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whether `at` lies within the last `days` days relative to `now`.
///
/// Timestamps in the future (clock skew between client and API) count as recent.
pub fn within_days(at: Option<DateTime<Utc>>, now: DateTime<Utc>, days: i64) -> bool {
    match at {
        Some(at) => at >= now - Duration::days(days),
        None => false,
    }
}

/// Truncate to at most `max_chars` characters, backing off to the last word
/// boundary so the preview never ends mid-word.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_days() {
        let now = Utc::now();
        assert!(within_days(Some(now - Duration::days(2)), now, 7));
        assert!(!within_days(Some(now - Duration::days(8)), now, 7));
        assert!(within_days(Some(now + Duration::hours(1)), now, 7));
        assert!(!within_days(None, now, 7));
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("short", 10), "short");
        assert_eq!(truncate_words("water quality matters", 12), "water…");
        assert_eq!(truncate_words("abcdefghij", 4), "abcd…");
    }
}
