use dired_core::action::{ActionCategory, ActionRegistry};
use dired_core::config::keymap::Keymap;
use dired_core::nav::render::DisplayRow;
use dired_core::nav::state::NavigationState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::panel::render_listing;
use crate::ui::popup::{render_popup, render_prompt, Prompt};
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Owned snapshot of what the listing shows.
///
/// Taken from the controller before a command runs so that modal prompts
/// can redraw the listing behind them while the controller is busy.
#[derive(Debug, Clone, Default)]
pub struct PanelView {
    pub title: String,
    pub rows: Vec<DisplayRow>,
    pub cursor: usize,
    pub query: String,
    /// Number of rows before filtering.
    pub total: usize,
}

impl PanelView {
    pub fn from_state(state: &NavigationState) -> Self {
        Self {
            title: format!(" {} ", state.current_dir().display()),
            rows: state.visible_rows().into_iter().cloned().collect(),
            cursor: state.cursor(),
            query: state.query().to_owned(),
            total: state.flat_rows().len(),
        }
    }

    pub fn selected(&self) -> Option<&DisplayRow> {
        self.rows.get(self.cursor)
    }
}

/// Main render function: composes the full UI layout each frame.
pub fn render(f: &mut Frame, view: &PanelView, app: &App, prompt: Option<Prompt<'_>>) {
    let search = app.search_query();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(if search.is_some() { 1 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_listing(f, chunks[0], &view.rows, view.cursor, &view.title, &view.query);

    if let Some(query) = search {
        let bar = Paragraph::new(Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{query}_")),
        ]));
        f.render_widget(bar, chunks[1]);
    }

    let props = StatusBarProps {
        row_count: view.rows.len(),
        total_count: view.total,
        selected_index: view.cursor,
        selected_row: view.selected(),
        query: &view.query,
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[2], &props);

    if *app.mode() == AppMode::Help {
        let lines = help_lines(app.action_registry(), app.keymap());
        render_popup(f, "Help", &lines, 80);
    }
    if let Some(prompt) = prompt {
        render_prompt(f, prompt);
    }
}

/// Builds the help overlay from the action registry, grouped by category.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines = Vec::new();
    let mut category: Option<ActionCategory> = None;

    for desc in registry.all() {
        if category != Some(desc.category) {
            if category.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("{}:", desc.category.label()));
            category = Some(desc.category);
        }
        let keys = keymap
            .keys_for_action(desc.action)
            .map(|keys| keys.join("/"))
            .unwrap_or_default();
        lines.push(format!("  {keys:<18} {}", desc.description));
    }

    lines.push(String::new());
    lines.push("Press Esc or ? to close".to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lines_group_by_category() {
        let lines = help_lines(&ActionRegistry::new(), &Keymap::default());

        assert_eq!(lines[0], "Navigation:");
        assert!(lines.iter().any(|l| l == "File:"));
        assert!(lines.iter().any(|l| l == "System:"));
        assert_eq!(lines.last().unwrap(), "Press Esc or ? to close");
    }

    #[test]
    fn help_lines_list_bound_keys() {
        let lines = help_lines(&ActionRegistry::new(), &Keymap::default());

        let down = lines
            .iter()
            .find(|l| l.contains("Move to the next row"))
            .unwrap();
        assert!(down.contains("Ctrl+n/Down/j"));
    }

    #[test]
    fn panel_view_selected_follows_cursor() {
        let view = PanelView::default();
        assert!(view.selected().is_none());
    }
}
