//! Subsequence filtering of display rows.

use std::borrow::Borrow;
use std::collections::HashMap;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::nav::render::DisplayRow;

/// Case-insensitive ordered-subsequence test.
///
/// Every character of `query` must appear in `text` in the same relative
/// order, not necessarily contiguously. An empty query matches everything.
///
/// ```
/// use dired_core::nav::filter::fuzzy_match;
///
/// assert!(fuzzy_match("mdr", "README.md") == false);
/// assert!(fuzzy_match("rdm", "README.md"));
/// ```
pub fn fuzzy_match(query: &str, text: &str) -> bool {
    let query: Vec<char> = query.to_lowercase().chars().collect();
    if query.is_empty() {
        return true;
    }

    let mut q = 0;
    for c in text.to_lowercase().chars() {
        if c == query[q] {
            q += 1;
            if q == query.len() {
                return true;
            }
        }
    }
    false
}

/// Computes which rows stay visible under `query`.
///
/// A row is visible iff its relative path fuzzy-matches the query and,
/// for nested rows, its parent row is visible too. Rows must be in
/// display order (a parent always precedes its children).
pub fn visibility<R: Borrow<DisplayRow>>(rows: &[R], query: &str) -> Vec<bool> {
    if query.is_empty() {
        return vec![true; rows.len()];
    }

    let mut seen: HashMap<&str, bool> = HashMap::with_capacity(rows.len());
    rows.iter()
        .map(|row| {
            let row: &DisplayRow = row.borrow();
            let parent_visible = match row.path.rfind('/') {
                Some(i) => seen.get(&row.path[..i]).copied().unwrap_or(true),
                None => true,
            };
            let visible = parent_visible && fuzzy_match(query, &row.path);
            seen.insert(row.path.as_str(), visible);
            visible
        })
        .collect()
}

/// Character indices in `text` to highlight for `query`.
///
/// Returns `None` when `text` does not pass [`fuzzy_match`], so highlights
/// never disagree with visibility.
pub fn match_indices(query: &str, text: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }
    if !fuzzy_match(query, text) {
        return None;
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    matcher
        .fuzzy_indices(text, query)
        .map(|(_score, indices)| indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::EntryKind;

    fn row(path: &str) -> DisplayRow {
        DisplayRow {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap().to_string(),
            kind: EntryKind::File,
            link_target: String::new(),
            depth: path.matches('/').count(),
            display: path.to_string(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(fuzzy_match("", ""));
        assert!(fuzzy_match("", "anything"));
    }

    #[test]
    fn subsequence_in_order() {
        assert!(fuzzy_match("atx", "a.txt"));
        assert!(fuzzy_match("abc", "a_b_c"));
        assert!(!fuzzy_match("cba", "a_b_c"));
    }

    #[test]
    fn case_insensitive() {
        assert!(fuzzy_match("READ", "readme.md"));
        assert!(fuzzy_match("read", "README.md"));
    }

    #[test]
    fn query_longer_than_text_fails() {
        assert!(!fuzzy_match("abcd", "abc"));
    }

    #[test]
    fn ab_matches_none_of_the_sample_directory() {
        assert!(!fuzzy_match("ab", "a.txt"));
        assert!(!fuzzy_match("ab", "b.txt"));
        assert!(!fuzzy_match("ab", "sub"));
        assert!(fuzzy_match("ab", "a-b.txt"));
    }

    #[test]
    fn repeated_characters_need_repeated_matches() {
        assert!(!fuzzy_match("oo", "foa"));
        assert!(fuzzy_match("oo", "foo"));
    }

    #[test]
    fn visibility_of_flat_rows() {
        let rows = vec![row("a.txt"), row("b.txt"), row("sub")];
        assert_eq!(visibility(&rows, "ab"), vec![false, false, false]);
        assert_eq!(visibility(&rows, "txt"), vec![true, true, false]);
        assert_eq!(visibility(&rows, ""), vec![true, true, true]);
    }

    #[test]
    fn hidden_parent_hides_children() {
        let rows = vec![row("src"), row("src/lib.rs"), row("docs"), row("docs/src.md")];
        // "src" matches src, src/lib.rs and docs/src.md, but docs is hidden
        assert_eq!(visibility(&rows, "src"), vec![true, true, false, false]);
    }

    #[test]
    fn child_matches_on_full_relative_path() {
        let rows = vec![row("sub"), row("sub/a.txt")];
        assert_eq!(visibility(&rows, "s"), vec![true, true]);
        assert_eq!(visibility(&rows, "sa"), vec![false, false]);
    }

    #[test]
    fn match_indices_agree_with_fuzzy_match() {
        assert_eq!(match_indices("ab", "a.txt"), None);
        let indices = match_indices("rd", "readme").unwrap();
        assert_eq!(indices.len(), 2);
        assert_eq!(indices[0], 0);
    }

    #[test]
    fn match_indices_empty_query() {
        assert_eq!(match_indices("", "x"), Some(Vec::new()));
    }
}
