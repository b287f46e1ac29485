//! Tag fragment pipeline - splitting, deduplication, and final rendering.
//!
//! Free-text inputs (prefix, character, suffix) arrive as comma- or
//! newline-separated strings; preset draws arrive as whole tags that may
//! themselves contain commas. This module provides the shared string
//! pipeline: split free text into clean fragments, deduplicate while
//! preserving first occurrence, and render the final prompt with
//! normalized comma punctuation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Separator used between fragments in the rendered prompt.
pub const SEPARATOR: &str = ", ";

fn comma_run_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(,\s*){2,}").ok()).as_ref()
}

fn edge_comma_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*,\s*|\s*,\s*$").ok())
        .as_ref()
}

/// Split a comma- or newline-separated string into trimmed fragments.
///
/// Blank fragments are dropped; remaining fragments keep their input
/// order. Windows line endings are handled by trimming.
///
/// # Example
///
/// ```
/// use promptdeck::fragment::split_tags;
///
/// let tags = split_tags("masterpiece, best quality\n , detailed");
/// assert_eq!(tags, vec!["masterpiece", "best quality", "detailed"]);
/// ```
#[must_use]
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Deduplicate fragments case-sensitively, preserving first occurrence.
///
/// Each fragment is trimmed before comparison; blank fragments are
/// dropped. Later duplicates are discarded so the earliest mention of a
/// tag keeps its position.
///
/// # Example
///
/// ```
/// use promptdeck::fragment::dedup_tags;
///
/// let unique = dedup_tags(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
/// assert_eq!(unique, vec!["a", "b"]);
/// ```
#[must_use]
pub fn dedup_tags(parts: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for part in parts {
        let trimmed = part.trim();
        if !trimmed.is_empty() && !seen.contains(trimmed) {
            seen.insert(trimmed.to_string());
            unique.push(trimmed.to_string());
        }
    }
    unique
}

/// Render fragments into the final prompt string.
///
/// Fragments are joined with `", "`, runs of two or more comma-separated
/// empty segments collapse to a single separator, and boundary commas are
/// stripped. Commas inside a single fragment are preserved as written.
///
/// # Example
///
/// ```
/// use promptdeck::fragment::render;
///
/// let parts = vec!["masterpiece".to_string(), "1girl,, smiling".to_string()];
/// assert_eq!(render(&parts), "masterpiece, 1girl, smiling");
/// ```
#[must_use]
pub fn render(parts: &[String]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    // Draws may carry their own punctuation; normalize on the joined
    // string rather than re-splitting so single commas inside a fragment
    // survive untouched.
    let collapsed = match comma_run_regex() {
        Some(re) => re.replace_all(&joined, SEPARATOR).into_owned(),
        None => joined,
    };
    match edge_comma_regex() {
        Some(re) => re.replace_all(&collapsed, "").into_owned(),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Splitting tests

    #[test]
    fn test_split_on_commas() {
        assert_eq!(split_tags("a, b, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_on_newlines() {
        assert_eq!(split_tags("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_mixed_separators_and_whitespace() {
        assert_eq!(
            split_tags("  a ,\n b,c \n d  "),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_split_windows_line_endings() {
        assert_eq!(split_tags("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_drops_blank_segments() {
        assert_eq!(split_tags("a,, ,\n\n,b"), vec!["a", "b"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags("  , \n ").is_empty());
    }

    #[test]
    fn test_split_preserves_internal_whitespace() {
        assert_eq!(split_tags("best quality, long hair"), vec![
            "best quality",
            "long hair"
        ]);
    }

    // Deduplication tests

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let parts = vec!["a", "b", "a", "c", "b"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(dedup_tags(parts), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let parts = vec!["Cat".to_string(), "cat".to_string()];
        assert_eq!(dedup_tags(parts), vec!["Cat", "cat"]);
    }

    #[test]
    fn test_dedup_drops_blanks() {
        let parts = vec!["a".to_string(), "  ".to_string(), String::new(), "b".to_string()];
        assert_eq!(dedup_tags(parts), vec!["a", "b"]);
    }

    #[test]
    fn test_dedup_trims_before_comparing() {
        let parts = vec![" a ".to_string(), "a".to_string()];
        assert_eq!(dedup_tags(parts), vec!["a"]);
    }

    // Rendering tests

    #[test]
    fn test_render_joins_with_separator() {
        let parts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render(&parts), "a, b");
    }

    #[test]
    fn test_render_empty_parts() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_render_collapses_comma_runs() {
        // A drawn tag carrying its own trailing comma creates a run at the
        // join point.
        let parts = vec!["a".to_string(), "b,".to_string(), "c".to_string()];
        assert_eq!(render(&parts), "a, b, c");

        let parts = vec!["a,,b".to_string()];
        assert_eq!(render(&parts), "a, b");
    }

    #[test]
    fn test_render_strips_boundary_commas() {
        let parts = vec![",a".to_string(), "b,".to_string()];
        assert_eq!(render(&parts), "a, b");
    }

    #[test]
    fn test_render_keeps_single_commas_inside_fragment() {
        let parts = vec!["a ,long".to_string()];
        assert_eq!(render(&parts), "a ,long");
    }
}
