pub(crate) mod browse;
pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod edit;
pub(crate) mod export;
pub(crate) mod status;

/// Truncate a string to a maximum number of characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
