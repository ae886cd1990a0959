//! Search term handling: normalization and the input debouncer.

mod debounce;

pub use debounce::Debouncer;

/// Normalize a raw search string.
///
/// Surrounding whitespace is stripped. A blank term means "no search", so
/// whitespace-only input lists every note rather than being rejected.
///
/// # Examples
///
/// ```
/// use notehub::search::normalize_search;
///
/// assert_eq!(normalize_search("  groceries "), Some("groceries".to_string()));
/// assert_eq!(normalize_search("   "), None);
/// ```
pub fn normalize_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
