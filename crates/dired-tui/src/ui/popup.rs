use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// A question currently shown on top of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// Yes/no question.
    Confirm(&'a str),
    /// Single-line text input with the value typed so far.
    Input { prompt: &'a str, value: &'a str },
}

/// Renders a centered popup dialog with the given title and message lines.
pub fn render_popup(f: &mut Frame, title: &str, lines: &[String], percent_y: u16) {
    let area = centered_rect(60, percent_y, f.area());

    f.render_widget(Clear, area);

    let content: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();

    let popup = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_owned())
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(popup, area);
}

/// Renders a [`Prompt`] as a small popup.
pub fn render_prompt(f: &mut Frame, prompt: Prompt<'_>) {
    let (title, lines) = prompt_lines(prompt);
    render_popup(f, title, &lines, 25);
}

fn prompt_lines(prompt: Prompt<'_>) -> (&'static str, Vec<String>) {
    match prompt {
        Prompt::Confirm(message) => (
            "Confirm",
            vec![
                message.to_owned(),
                String::new(),
                "y to confirm, n or Esc to cancel".to_owned(),
            ],
        ),
        Prompt::Input { prompt, value } => (
            "Input",
            vec![
                prompt.to_owned(),
                format!("> {value}_"),
                String::new(),
                "Enter to accept, Esc to cancel".to_owned(),
            ],
        ),
    }
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_shows_message_and_hint() {
        let (title, lines) = prompt_lines(Prompt::Confirm("Are you sure you want to delete a?"));
        assert_eq!(title, "Confirm");
        assert_eq!(lines[0], "Are you sure you want to delete a?");
        assert!(lines.iter().any(|l| l.contains("y to confirm")));
    }

    #[test]
    fn input_prompt_shows_value_with_caret() {
        let (_, lines) = prompt_lines(Prompt::Input {
            prompt: "Rename a to:",
            value: "b.txt",
        });
        assert_eq!(lines[0], "Rename a to:");
        assert_eq!(lines[1], "> b.txt_");
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, parent);

        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 10);
    }
}
