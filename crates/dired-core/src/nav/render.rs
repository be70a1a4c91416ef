//! Turns resolved entries into display rows.

use serde::{Deserialize, Serialize};

use crate::fs::entry::{Entry, EntryKind};

/// Columns of indentation per nesting level.
pub const INDENT_WIDTH: usize = 4;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";

/// One rendered line of the listing.
///
/// `path` is relative to the listing root and doubles as the row identity:
/// `sub/inner.txt` for a nested row, bare `inner.txt` at the top level.
/// It is built from on-disk names so it can be joined back onto the
/// directory; `name` and `display` carry the NFC form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub link_target: String,
    /// Number of path segments above this row; `0` at the top level.
    pub depth: usize,
    pub display: String,
}

impl DisplayRow {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// The path an `open` should act on.
    ///
    /// For symlinks this is the link target; a relative target is resolved
    /// against the directory holding the link.
    pub fn open_target(&self) -> String {
        if self.kind != EntryKind::Symlink || self.link_target.is_empty() {
            return self.path.clone();
        }
        if self.link_target.starts_with('/') {
            return self.link_target.clone();
        }
        match self.path.rfind('/') {
            Some(i) => format!("{}/{}", &self.path[..i], self.link_target),
            None => self.link_target.clone(),
        }
    }

    /// Returns `true` if `self` sits somewhere below the row at `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &str) -> bool {
        self.path.len() > ancestor.len()
            && self.path.starts_with(ancestor)
            && self.path.as_bytes()[ancestor.len()] == b'/'
    }
}

/// Renders `entries` listed under `parent`.
///
/// With `indentable` false (the top-level listing) rows are flat. With it
/// true each row gets a tree glyph, `└── ` on the last sibling, padded to
/// the nesting depth of `parent`.
pub fn render(parent: &str, entries: &[Entry], indentable: bool) -> Vec<DisplayRow> {
    let parent = parent.trim_end_matches('/');
    let depth = if indentable { path_depth(parent) } else { 0 };
    let last = entries.len().saturating_sub(1);

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let glyph = if indentable {
                let branch = if i == last { LAST_BRANCH } else { BRANCH };
                format!("{branch:>width$}", width = depth * INDENT_WIDTH)
            } else {
                String::new()
            };
            let path = if indentable && !parent.is_empty() {
                format!("{parent}/{}", entry.file_name())
            } else {
                entry.file_name().to_string()
            };
            let link = if entry.link_target().is_empty() {
                String::new()
            } else {
                format!(" -> {}", entry.link_target())
            };
            let display = format!(
                "{} {} {}        {glyph}{}{link}",
                entry.mode(),
                entry.size(),
                entry.mtime(),
                entry.name()
            );

            DisplayRow {
                path,
                name: entry.name().to_string(),
                kind: entry.kind(),
                link_target: entry.link_target().to_string(),
                depth,
                display,
            }
        })
        .collect()
}

fn path_depth(parent: &str) -> usize {
    parent.split('/').filter(|s| !s.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::resolve;
    use crate::fs::ops::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    fn entries(names: &[&str]) -> (TempDir, Vec<Entry>) {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), "x").unwrap();
        }
        let entries = names
            .iter()
            .map(|n| resolve(&LocalFs, tmp.path(), n).unwrap())
            .collect();
        (tmp, entries)
    }

    #[test]
    fn top_level_is_flat() {
        let (_tmp, entries) = entries(&["a.txt", "b.txt"]);
        let rows = render("", &entries, false);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].path, "a.txt");
        assert_eq!(rows[0].depth, 0);
        assert!(!rows[0].display.contains('├'));
        assert!(!rows[1].display.contains('└'));
        assert!(rows[0].display.ends_with("        a.txt"));
    }

    #[test]
    fn nested_rows_get_glyphs_and_paths() {
        let (_tmp, entries) = entries(&["one", "two"]);
        let rows = render("sub", &entries, true);

        assert_eq!(rows[0].path, "sub/one");
        assert_eq!(rows[1].path, "sub/two");
        assert_eq!(rows[0].depth, 1);
        assert!(rows[0].display.ends_with("├── one"));
        assert!(rows[1].display.ends_with("└── two"));
    }

    #[test]
    fn path_uses_on_disk_name_and_display_uses_nfc() {
        let (_tmp, entries) = entries(&["cafe\u{301}"]);
        let rows = render("sub", &entries, true);

        assert_eq!(rows[0].path, "sub/cafe\u{301}");
        assert_eq!(rows[0].name, "caf\u{e9}");
        assert!(rows[0].display.ends_with("└── caf\u{e9}"));
    }

    #[test]
    fn deeper_nesting_indents_by_four() {
        let (_tmp, entries) = entries(&["leaf"]);
        let rows = render("a/b", &entries, true);

        assert_eq!(rows[0].path, "a/b/leaf");
        assert_eq!(rows[0].depth, 2);
        assert!(rows[0].display.ends_with("            └── leaf"));
    }

    #[test]
    fn display_columns() {
        let (_tmp, entries) = entries(&["f"]);
        let rows = render("", &entries, false);
        let e = &entries[0];
        let expected = format!("{} {} {}        f", e.mode(), e.size(), e.mtime());
        assert_eq!(rows[0].display, expected);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_row_shows_target() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real"), "").unwrap();
        std::os::unix::fs::symlink("real", tmp.path().join("link")).unwrap();
        let entry = resolve(&LocalFs, tmp.path(), "link").unwrap();

        let rows = render("", &[entry], false);
        assert!(rows[0].display.ends_with("link -> real"));
        assert_eq!(rows[0].open_target(), "real");
    }

    #[test]
    fn nested_relative_link_resolves_against_its_directory() {
        let link = DisplayRow {
            path: "sub/link".into(),
            name: "link".into(),
            kind: EntryKind::Symlink,
            link_target: "../data".into(),
            depth: 1,
            display: String::new(),
        };
        assert_eq!(link.open_target(), "sub/../data");

        let absolute = DisplayRow {
            link_target: "/etc".into(),
            ..link.clone()
        };
        assert_eq!(absolute.open_target(), "/etc");

        let plain = DisplayRow {
            kind: EntryKind::File,
            ..link
        };
        assert_eq!(plain.open_target(), "sub/link");
    }

    #[test]
    fn descendant_check_respects_segment_boundaries() {
        let (_tmp, entries) = entries(&["x"]);
        let rows = render("sub", &entries, true);
        assert!(rows[0].is_descendant_of("sub"));
        assert!(!rows[0].is_descendant_of("su"));
        assert!(!rows[0].is_descendant_of("sub/x"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render("sub", &[], true).is_empty());
    }
}
