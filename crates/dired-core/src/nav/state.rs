//! Per-panel navigation state.
//!
//! [`NavigationState`] follows the crate-wide immutability convention: every
//! transition consumes `self` and returns the next state, so a controller
//! can build a new state completely before committing it. The cursor always
//! indexes the *visible* (post-filter) row sequence and is clamped or
//! wrapped to its bounds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::nav::filter::visibility;
use crate::nav::render::DisplayRow;

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Everything one panel remembers between commands.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current_dir: PathBuf,
    rows: Vec<DisplayRow>,
    /// Expanded directory row path -> its rendered children.
    expanded: HashMap<String, Vec<DisplayRow>>,
    query: String,
    cursor: usize,
    /// One-shot focus request, matched by basename on the next listing.
    focused: Option<PathBuf>,
    cursor_memory: HashMap<PathBuf, usize>,
}

impl NavigationState {
    /// Creates an empty state positioned at `current_dir`.
    pub fn new(current_dir: PathBuf) -> Self {
        Self {
            current_dir,
            ..Self::default()
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// The top-level rows of the current listing, unfiltered.
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&Path> {
        self.focused.as_deref()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains_key(path)
    }

    /// Remembered cursor index for `dir`, if one was recorded.
    pub fn remembered_cursor(&self, dir: &Path) -> Option<usize> {
        self.cursor_memory.get(dir).copied()
    }

    /// Every row in display order with expansions spliced in.
    pub fn flat_rows(&self) -> Vec<&DisplayRow> {
        flatten(&self.rows, &self.expanded)
    }

    /// Rows that survive the current filter, in display order.
    pub fn visible_rows(&self) -> Vec<&DisplayRow> {
        visible(&self.flat_rows(), &self.query)
    }

    /// The row under the cursor, if any row is visible.
    pub fn selected(&self) -> Option<&DisplayRow> {
        self.visible_rows().get(self.cursor).copied()
    }

    /// Replaces the listing for `dir`.
    ///
    /// Expansions and the filter are cleared. The cursor lands on the
    /// pending focus if it is present in the new rows, else on `preferred`
    /// when in range, else on `0`. The focus request is consumed either way.
    pub fn with_listing(self, dir: PathBuf, rows: Vec<DisplayRow>, preferred: Option<usize>) -> Self {
        let focus_name = self.focused.as_deref().and_then(basename);
        let cursor = {
            let refs: Vec<&DisplayRow> = rows.iter().collect();
            initial_cursor(&refs, focus_name.as_deref(), preferred)
        };
        Self {
            current_dir: dir,
            rows,
            expanded: HashMap::new(),
            query: String::new(),
            cursor,
            focused: None,
            ..self
        }
    }

    /// Moves the cursor to `index`, clamped to the visible rows.
    pub fn with_cursor(self, index: usize) -> Self {
        let len = self.visible_rows().len();
        Self {
            cursor: clamp_cursor(index, len),
            ..self
        }
    }

    /// Moves the cursor one row, wrapping at either end.
    pub fn step(self, step: Step) -> Self {
        let len = self.visible_rows().len();
        Self {
            cursor: next_cursor(self.cursor, len, step),
            ..self
        }
    }

    /// Applies a (trimmed) filter query and resets the cursor to `0`.
    pub fn with_query(self, query: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            cursor: 0,
            ..self
        }
    }

    pub fn with_focus(self, focused: Option<PathBuf>) -> Self {
        Self { focused, ..self }
    }

    /// Records the cursor position to restore when `dir` is re-entered.
    pub fn with_remembered_cursor(mut self, dir: PathBuf, index: usize) -> Self {
        self.cursor_memory.insert(dir, index);
        self
    }

    /// Marks `path` expanded with `children` and keeps the cursor on it.
    pub fn with_expansion(mut self, path: &str, children: Vec<DisplayRow>) -> Self {
        self.expanded.insert(path.to_string(), children);
        self.cursor_on(path)
    }

    /// Collapses `path` together with any expansions nested inside it.
    pub fn without_expansion(mut self, path: &str) -> Self {
        let prefix = format!("{path}/");
        self.expanded
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        self.cursor_on(path)
    }

    fn cursor_on(self, path: &str) -> Self {
        let position = self.visible_rows().iter().position(|r| r.path == path);
        match position {
            Some(index) => Self {
                cursor: index,
                ..self
            },
            None => {
                let cursor = self.cursor;
                self.with_cursor(cursor)
            }
        }
    }
}

/// Splices expanded children after their parent rows, depth first.
pub fn flatten<'a>(
    rows: &'a [DisplayRow],
    expanded: &'a HashMap<String, Vec<DisplayRow>>,
) -> Vec<&'a DisplayRow> {
    let mut out = Vec::with_capacity(rows.len());
    push_flat(rows, expanded, &mut out);
    out
}

fn push_flat<'a>(
    rows: &'a [DisplayRow],
    expanded: &'a HashMap<String, Vec<DisplayRow>>,
    out: &mut Vec<&'a DisplayRow>,
) {
    for row in rows {
        out.push(row);
        if let Some(children) = expanded.get(&row.path) {
            push_flat(children, expanded, out);
        }
    }
}

/// Filters a flattened sequence down to the rows visible under `query`.
pub fn visible<'a>(flat: &[&'a DisplayRow], query: &str) -> Vec<&'a DisplayRow> {
    if query.is_empty() {
        return flat.to_vec();
    }
    let mask = visibility(flat, query);
    flat.iter()
        .zip(mask)
        .filter_map(|(row, keep)| keep.then_some(*row))
        .collect()
}

/// The cursor after one step over `len` visible rows. Wraps at both ends;
/// stays `0` when nothing is visible.
pub fn next_cursor(cursor: usize, len: usize, step: Step) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    match step {
        Step::Down => (cursor + 1) % len,
        Step::Up => {
            if cursor == 0 {
                len - 1
            } else {
                cursor - 1
            }
        }
    }
}

/// Clamps `index` into `[0, len - 1]`, or `0` when empty.
pub fn clamp_cursor(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

/// Chooses where the cursor lands on a fresh listing: the first row whose
/// path equals `focus`, else `preferred` if in range, else `0`.
pub fn initial_cursor(rows: &[&DisplayRow], focus: Option<&str>, preferred: Option<usize>) -> usize {
    if let Some(index) = focus.and_then(|name| rows.iter().position(|r| r.path == name)) {
        return index;
    }
    match preferred {
        Some(index) if index < rows.len() => index,
        _ => 0,
    }
}

fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
