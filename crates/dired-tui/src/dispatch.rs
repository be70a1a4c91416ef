//! Turns input actions into controller commands and app state changes.

use dired_core::action::Action;
use dired_core::event::{Command, Event};
use dired_core::fs::entry::EntryKind;
use dired_core::fs::ops::FileSystem;
use dired_core::nav::controller::Controller;
use dired_core::nav::state::NavigationState;
use tracing::warn;

use crate::app::{App, AppMode};
use crate::host::Host;
use crate::input::InputAction;

/// Builds the command for a listing action, using the selected row as
/// context. Returns `None` for actions that do not reach the controller or
/// that make no sense for the selection.
pub fn command_for(action: Action, state: &NavigationState) -> Option<Command> {
    let selected = state.selected();
    let cursor_index = Some(state.cursor());

    match action {
        Action::CursorDown => Some(Command::CursorDown),
        Action::CursorUp => Some(Command::CursorUp),
        Action::Reload => Some(Command::Reload),
        Action::Open => selected.map(|row| Command::Open {
            path: row.open_target(),
            cursor_index,
        }),
        Action::GoParent => Some(Command::Open {
            path: "..".to_owned(),
            cursor_index,
        }),
        Action::ToggleExpand => selected.filter(|row| row.is_dir()).map(|row| Command::Expand {
            path: row.path.clone(),
            index: state.cursor(),
        }),
        Action::Delete => selected.map(|row| Command::ConfirmDelete {
            path: row.path.clone(),
        }),
        Action::Rename => selected.map(|row| Command::RequestRename {
            path: row.path.clone(),
        }),
        Action::NewFile => {
            let (path, kind) = create_context(state);
            Some(Command::CreateNewFile { path, kind })
        }
        Action::NewDirectory => {
            let (path, kind) = create_context(state);
            Some(Command::CreateNewDir { path, kind })
        }
        Action::Search | Action::CloseSearch | Action::Help | Action::Quit => None,
    }
}

/// Where a create command should land: next to the selected row, or in the
/// current directory when nothing is selected.
fn create_context(state: &NavigationState) -> (String, EntryKind) {
    match state.selected() {
        Some(row) => (row.path.clone(), row.kind),
        None => (".".to_owned(), EntryKind::Directory),
    }
}

/// Applies one input action and returns the updated app.
pub fn apply<F, H>(app: App, input: InputAction, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    match input {
        InputAction::None => app,
        InputAction::CloseHelp => app.with_mode(AppMode::Normal),
        InputAction::SearchChar(c) => {
            let mut query = app.search_query().unwrap_or_default().to_owned();
            query.push(c);
            filter(app, query, controller, host)
        }
        InputAction::SearchBackspace => {
            let mut query = app.search_query().unwrap_or_default().to_owned();
            query.pop();
            filter(app, query, controller, host)
        }
        InputAction::Dispatch(action) => dispatch_action(app, action, controller, host),
    }
}

fn dispatch_action<F, H>(app: App, action: Action, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    match action {
        Action::Quit => app.with_quit(),
        Action::Help => app.with_mode(AppMode::Help),
        Action::Search => app.with_mode(AppMode::Search(String::new())),
        Action::CloseSearch => close_search(app.with_mode(AppMode::Normal), controller, host),
        Action::Open if app.search_query().is_some() => {
            let app = run_action(app, action, controller, host);
            close_search(app.with_mode(AppMode::Normal), controller, host)
        }
        _ => run_action(app, action, controller, host),
    }
}

fn run_action<F, H>(app: App, action: Action, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    match command_for(action, controller.state()) {
        Some(command) => run(app, command, controller, host),
        None => app,
    }
}

fn filter<F, H>(app: App, query: String, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    let command = Command::Filter {
        query: query.clone(),
    };
    run(app.with_mode(AppMode::Search(query)), command, controller, host)
}

/// Clears a leftover filter; a listing reload has usually done it already.
fn close_search<F, H>(app: App, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    if controller.state().query().is_empty() {
        return app;
    }
    let command = Command::Filter {
        query: String::new(),
    };
    run(app, command, controller, host)
}

/// Sends `command` to the controller and reflects the outcome in the
/// status bar.
fn run<F, H>(app: App, command: Command, controller: &mut Controller<F>, host: &mut H) -> App
where
    F: FileSystem,
    H: Host,
{
    let name = command.name();
    let app = match controller.handle(command, host) {
        Ok(Some(Event::Opened { path })) => app.with_status(format!("opened {}", path.display())),
        Ok(_) => app.without_status(),
        Err(e) => {
            warn!(command = name, error = %e, "command failed");
            app.with_status(e.to_string())
        }
    };
    match host.take_error() {
        Some(message) => app.with_status(message),
        None => app,
    }
}
