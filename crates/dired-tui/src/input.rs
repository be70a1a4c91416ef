use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dired_core::action::Action;
use dired_core::config::keymap::Keymap;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Run a bound action against the selected row.
    Dispatch(Action),
    /// Append a character to the search query.
    SearchChar(char),
    /// Remove the last character from the search query.
    SearchBackspace,
    /// Close the help overlay.
    CloseHelp,
    /// No action for this key.
    None,
}

/// Returns the keymap name of a key event (`"j"`, `"Enter"`, `"Ctrl+n"`),
/// or `None` for keys that are never bound.
pub fn key_name(key: KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let name = match key.code {
        KeyCode::Char(' ') if !ctrl => "Space".to_owned(),
        KeyCode::Char(c) if ctrl => format!("Ctrl+{}", c.to_ascii_lowercase()),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_owned(),
        KeyCode::Esc => "Esc".to_owned(),
        KeyCode::Backspace => "Backspace".to_owned(),
        KeyCode::Delete => "Delete".to_owned(),
        KeyCode::Up => "Up".to_owned(),
        KeyCode::Down => "Down".to_owned(),
        _ => return None,
    };
    Some(name)
}

/// Maps a key event to an InputAction based on the current mode.
///
/// Normal mode resolves every key through `keymap`. The search bar first
/// tries `search_keymap` (control keys only) and otherwise edits the query.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    keymap: &Keymap,
    search_keymap: &Keymap,
) -> InputAction {
    match mode {
        AppMode::Normal => lookup(key, keymap).unwrap_or(InputAction::None),
        AppMode::Search(_) => handle_search_key(key, search_keymap),
        AppMode::Help => handle_help_key(key),
    }
}

fn lookup(key: KeyEvent, keymap: &Keymap) -> Option<InputAction> {
    key_name(key)
        .and_then(|name| keymap.action_for_key(&name))
        .map(InputAction::Dispatch)
}

fn handle_search_key(key: KeyEvent, search_keymap: &Keymap) -> InputAction {
    if let Some(action) = lookup(key, search_keymap) {
        return action;
    }
    match key.code {
        KeyCode::Backspace => InputAction::SearchBackspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::SearchChar(c)
        }
        _ => InputAction::None,
    }
}

fn handle_help_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => InputAction::CloseHelp,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn normal(event: KeyEvent) -> InputAction {
        handle_key(event, &AppMode::Normal, &Keymap::default(), &Keymap::search())
    }

    fn search(event: KeyEvent) -> InputAction {
        handle_key(
            event,
            &AppMode::Search(String::new()),
            &Keymap::default(),
            &Keymap::search(),
        )
    }

    // --- key names ---

    #[test]
    fn key_name_for_plain_and_special_keys() {
        assert_eq!(key_name(key(KeyCode::Char('j'))).as_deref(), Some("j"));
        assert_eq!(key_name(key(KeyCode::Char(' '))).as_deref(), Some("Space"));
        assert_eq!(key_name(key(KeyCode::Enter)).as_deref(), Some("Enter"));
        assert_eq!(key_name(key(KeyCode::Delete)).as_deref(), Some("Delete"));
        assert_eq!(key_name(key(KeyCode::F(1))), None);
    }

    #[test]
    fn key_name_for_ctrl_chords() {
        let event = key_with_mod(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(key_name(event).as_deref(), Some("Ctrl+n"));
    }

    #[test]
    fn shifted_symbols_keep_their_character() {
        let event = key_with_mod(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(key_name(event).as_deref(), Some("+"));
    }

    // --- Normal mode ---

    #[test]
    fn normal_j_k_move_cursor() {
        assert_eq!(
            normal(key(KeyCode::Char('j'))),
            InputAction::Dispatch(Action::CursorDown)
        );
        assert_eq!(
            normal(key(KeyCode::Char('k'))),
            InputAction::Dispatch(Action::CursorUp)
        );
    }

    #[test]
    fn normal_arrows_mirror_j_k() {
        assert_eq!(normal(key(KeyCode::Down)), InputAction::Dispatch(Action::CursorDown));
        assert_eq!(normal(key(KeyCode::Up)), InputAction::Dispatch(Action::CursorUp));
    }

    #[test]
    fn normal_ctrl_n_ctrl_p_move_cursor() {
        let down = key_with_mod(KeyCode::Char('n'), KeyModifiers::CONTROL);
        let up = key_with_mod(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(normal(down), InputAction::Dispatch(Action::CursorDown));
        assert_eq!(normal(up), InputAction::Dispatch(Action::CursorUp));
    }

    #[test]
    fn normal_enter_opens() {
        assert_eq!(normal(key(KeyCode::Enter)), InputAction::Dispatch(Action::Open));
    }

    #[test]
    fn normal_space_toggles_expand() {
        assert_eq!(
            normal(key(KeyCode::Char(' '))),
            InputAction::Dispatch(Action::ToggleExpand)
        );
    }

    #[test]
    fn normal_file_operation_keys() {
        assert_eq!(normal(key(KeyCode::Char('+'))), InputAction::Dispatch(Action::NewFile));
        assert_eq!(
            normal(key(KeyCode::Char('d'))),
            InputAction::Dispatch(Action::NewDirectory)
        );
        assert_eq!(normal(key(KeyCode::Delete)), InputAction::Dispatch(Action::Delete));
        assert_eq!(normal(key(KeyCode::Backspace)), InputAction::Dispatch(Action::Delete));
        assert_eq!(normal(key(KeyCode::Char('r'))), InputAction::Dispatch(Action::Rename));
    }

    #[test]
    fn normal_ctrl_c_quits() {
        let event = key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(normal(event), InputAction::Dispatch(Action::Quit));
    }

    #[test]
    fn normal_unbound_key_is_none() {
        assert_eq!(normal(key(KeyCode::Char('z'))), InputAction::None);
        assert_eq!(normal(key(KeyCode::Tab)), InputAction::None);
    }

    // --- Search mode ---

    #[test]
    fn search_letters_edit_query() {
        assert_eq!(search(key(KeyCode::Char('j'))), InputAction::SearchChar('j'));
        assert_eq!(search(key(KeyCode::Char('/'))), InputAction::SearchChar('/'));
    }

    #[test]
    fn search_backspace_removes_char() {
        assert_eq!(search(key(KeyCode::Backspace)), InputAction::SearchBackspace);
    }

    #[test]
    fn search_ctrl_n_ctrl_p_move_cursor() {
        let down = key_with_mod(KeyCode::Char('n'), KeyModifiers::CONTROL);
        let up = key_with_mod(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(search(down), InputAction::Dispatch(Action::CursorDown));
        assert_eq!(search(up), InputAction::Dispatch(Action::CursorUp));
    }

    #[test]
    fn search_enter_opens_and_esc_closes() {
        assert_eq!(search(key(KeyCode::Enter)), InputAction::Dispatch(Action::Open));
        assert_eq!(search(key(KeyCode::Esc)), InputAction::Dispatch(Action::CloseSearch));
    }

    #[test]
    fn search_unbound_ctrl_chord_is_ignored() {
        let event = key_with_mod(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(search(event), InputAction::None);
    }

    // --- Help mode ---

    #[test]
    fn help_closes_on_esc_or_question_mark() {
        let help = |event| handle_key(event, &AppMode::Help, &Keymap::default(), &Keymap::search());
        assert_eq!(help(key(KeyCode::Esc)), InputAction::CloseHelp);
        assert_eq!(help(key(KeyCode::Char('?'))), InputAction::CloseHelp);
        assert_eq!(help(key(KeyCode::Char('j'))), InputAction::None);
    }
}
