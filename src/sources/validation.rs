use tracing::warn;

pub const MIN_IDENTIFIER_LEN: usize = 8;
pub const MAX_IDENTIFIER_LEN: usize = 14;

/// Digits only, 8 to 14 characters
pub fn is_valid_identifier(candidate: &str) -> bool {
    (MIN_IDENTIFIER_LEN..=MAX_IDENTIFIER_LEN).contains(&candidate.len())
        && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// Trim every entry and drop the invalid ones, keeping order.
///
/// Blank entries are skipped silently; anything else that fails validation is
/// logged with `origin`.
pub fn clean_identifiers<I, S>(raw: I, origin: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                return None;
            }
            if is_valid_identifier(trimmed) {
                Some(trimmed.to_string())
            } else {
                warn!("Ignoring invalid identifier '{}' from {}", trimmed, origin);
                None
            }
        })
        .collect()
}
