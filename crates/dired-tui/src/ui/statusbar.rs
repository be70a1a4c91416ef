//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected entry, the active filter and an
//! optional status message.

use dired_core::nav::render::DisplayRow;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub row_count: usize,
    pub total_count: usize,
    pub selected_index: usize,
    pub selected_row: Option<&'a DisplayRow>,
    pub query: &'a str,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let bg = Color::DarkGray;

    let position = position_text(props.row_count, props.selected_index);

    let row_info = props
        .selected_row
        .map(|row| {
            if row.is_dir() {
                format!("  [DIR] {}", row.path)
            } else {
                format!("  {}", row.path)
            }
        })
        .unwrap_or_default();

    let filter_span = filter_span(props.query, props.row_count, props.total_count, bg);

    let status_span = props
        .status_message
        .map(|msg| {
            Span::styled(
                format!("  {msg}"),
                Style::default()
                    .fg(Color::Red)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(row_info, Style::default().fg(Color::White).bg(bg)),
        filter_span,
        status_span,
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn position_text(row_count: usize, selected_index: usize) -> String {
    if row_count > 0 {
        format!(" {}/{}", selected_index + 1, row_count)
    } else {
        " 0/0".to_owned()
    }
}

/// Returns a span describing the active filter, or an empty span.
fn filter_span(query: &str, shown: usize, total: usize, bg: Color) -> Span<'static> {
    if query.is_empty() {
        return Span::raw("");
    }
    Span::styled(
        format!("  [filter: {query} {shown}/{total}]"),
        Style::default().fg(Color::Yellow).bg(bg),
    )
}
