//! Listing panel rendering.
//!
//! Renders the visible rows as a scrollable `List`. Directories are blue and
//! bold, symlinks cyan; while a filter is active the matched characters of
//! each name are highlighted.

use dired_core::fs::entry::EntryKind;
use dired_core::nav::filter::match_indices;
use dired_core::nav::render::DisplayRow;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Renders the listing with the row at `selected` highlighted.
pub fn render_listing(
    f: &mut Frame,
    area: Rect,
    rows: &[DisplayRow],
    selected: usize,
    title: &str,
    query: &str,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row_line(row, query)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(selected));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Splits a row's display text into the stat columns, the name and the
/// link suffix, styling each.
fn row_line(row: &DisplayRow, query: &str) -> Line<'static> {
    let link_len = if row.link_target.is_empty() {
        0
    } else {
        " -> ".len() + row.link_target.len()
    };
    let name_start = row
        .display
        .len()
        .saturating_sub(link_len + row.name.len());

    let (Some(prefix), Some(suffix)) = (
        row.display.get(..name_start),
        row.display.get(name_start + row.name.len()..),
    ) else {
        return Line::from(row.display.clone());
    };

    let mut spans = vec![Span::styled(
        prefix.to_owned(),
        Style::default().fg(Color::DarkGray),
    )];
    spans.extend(name_spans(&row.name, query, entry_style(row.kind)));
    if !suffix.is_empty() {
        spans.push(Span::styled(
            suffix.to_owned(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn entry_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::Directory => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        EntryKind::Symlink => Style::default().fg(Color::Cyan),
        EntryKind::File => Style::default(),
    }
}

/// Returns the name as spans, with the characters matched by `query`
/// underlined in yellow.
fn name_spans(name: &str, query: &str, base: Style) -> Vec<Span<'static>> {
    let indices = match match_indices(query, name) {
        Some(indices) if !indices.is_empty() => indices,
        _ => return vec![Span::styled(name.to_owned(), base)],
    };

    let highlight = base
        .fg(Color::Yellow)
        .add_modifier(Modifier::UNDERLINED);
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;

    for (i, c) in name.chars().enumerate() {
        let matched = indices.contains(&i);
        if matched != run_matched && !run.is_empty() {
            let style = if run_matched { highlight } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = matched;
        run.push(c);
    }
    if !run.is_empty() {
        let style = if run_matched { highlight } else { base };
        spans.push(Span::styled(run, style));
    }
    spans
}
