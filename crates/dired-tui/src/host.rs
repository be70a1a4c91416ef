//! Terminal implementation of the controller's collaborators.
//!
//! Prompts run as small modal loops: they redraw the listing snapshot with a
//! popup on top and read keys until the user answers. Documents open in
//! `$EDITOR` outside the alternate screen.

use std::io;
use std::path::Path;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dired_core::error::{CoreError, CoreResult};
use dired_core::nav::controller::{Opener, Prompter};
use tracing::{debug, warn};

use crate::app::App;
use crate::render::{render, PanelView};
use crate::ui::popup::Prompt;
use crate::Tui;

const DEFAULT_EDITOR: &str = "vi";

/// Collaborators the dispatcher needs: the controller's prompter and opener
/// plus a way to collect the messages shown to the user.
pub trait Host: Prompter + Opener {
    /// Takes the last message passed to [`Prompter::show_error`].
    fn take_error(&mut self) -> Option<String>;
}

/// Answer to a key press inside a modal loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal<T> {
    Continue,
    Done(T),
}

/// Prompter and opener backed by the real terminal.
pub struct TerminalHost<'a> {
    terminal: &'a mut Tui,
    app: App,
    backdrop: PanelView,
    error: Option<String>,
}

impl<'a> TerminalHost<'a> {
    pub fn new(terminal: &'a mut Tui, app: App, backdrop: PanelView) -> Self {
        Self {
            terminal,
            app,
            backdrop,
            error: None,
        }
    }

    /// Draws the backdrop with `prompt` on top and feeds key presses to
    /// `on_key` until it is done.
    fn modal<T>(
        &mut self,
        mut prompt_for: impl FnMut() -> (String, Option<String>),
        mut on_key: impl FnMut(KeyEvent) -> Modal<T>,
    ) -> io::Result<T> {
        loop {
            let (message, value) = prompt_for();
            let prompt = match &value {
                Some(value) => Prompt::Input {
                    prompt: &message,
                    value,
                },
                None => Prompt::Confirm(&message),
            };
            let (backdrop, app) = (&self.backdrop, &self.app);
            self.terminal
                .draw(|f| render(f, backdrop, app, Some(prompt)))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Modal::Done(answer) = on_key(key) {
                    return Ok(answer);
                }
            }
        }
    }
}

impl Prompter for TerminalHost<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        let result = self.modal(|| (message.to_owned(), None), confirm_key);
        result.unwrap_or_else(|e| {
            warn!(error = %e, "confirm prompt failed");
            false
        })
    }

    fn input_text(&mut self, prompt: &str, default: Option<&str>) -> Option<String> {
        let value = std::cell::RefCell::new(default.unwrap_or_default().to_owned());
        let result = self.modal(
            || (prompt.to_owned(), Some(value.borrow().clone())),
            |key| edit_key(&mut value.borrow_mut(), key),
        );
        result.unwrap_or_else(|e| {
            warn!(error = %e, "input prompt failed");
            None
        })
    }

    fn show_error(&mut self, message: &str) {
        debug!(message, "showing error");
        self.error = Some(message.to_owned());
    }
}

impl Opener for TerminalHost<'_> {
    fn open_document(&mut self, path: &Path) -> CoreResult<()> {
        launch_editor(self.terminal, path)
    }
}

impl Host for TerminalHost<'_> {
    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}

fn confirm_key(key: KeyEvent) -> Modal<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Modal::Done(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
            Modal::Done(false)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Modal::Done(false),
        _ => Modal::Continue,
    }
}

/// Applies one key to a line being edited.
fn edit_key(value: &mut String, key: KeyEvent) -> Modal<Option<String>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Modal::Done(Some(value.clone())),
        KeyCode::Esc => Modal::Done(None),
        KeyCode::Char('c') if ctrl => Modal::Done(None),
        KeyCode::Char('u') if ctrl => {
            value.clear();
            Modal::Continue
        }
        KeyCode::Backspace => {
            value.pop();
            Modal::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            value.push(c);
            Modal::Continue
        }
        _ => Modal::Continue,
    }
}

/// Suspends the TUI, opens `file_path` in `$EDITOR` and waits for it.
fn launch_editor(terminal: &mut Tui, file_path: &Path) -> CoreResult<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
    debug!(editor, path = %file_path.display(), "launching editor");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let status = std::process::Command::new(&editor).arg(file_path).status();

    // Re-enter alternate screen regardless of editor result
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(CoreError::Io(io::Error::other(format!(
            "{editor} exited with {s}"
        )))),
        Err(e) => Err(CoreError::Io(io::Error::new(
            e.kind(),
            format!("failed to launch {editor}: {e}"),
        ))),
    }
}
