//! Key bindings.
//!
//! Key names (e.g. `"j"`, `"Enter"`, `"Ctrl+n"`) map to [`Action`] values.
//! The bindings are fixed: users build muscle memory around them, so they
//! are not loaded from configuration.

use std::collections::HashMap;

use crate::action::Action;

/// Complete set of key bindings for one input context.
///
/// Stores bindings as a `HashMap<String, Action>` for O(1) lookup plus a
/// reverse map for the help overlay.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for help display).
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    /// Bindings for the listing.
    fn default() -> Self {
        Self::from_pairs(&[
            // Navigation
            ("j", Action::CursorDown),
            ("k", Action::CursorUp),
            ("Down", Action::CursorDown),
            ("Up", Action::CursorUp),
            ("Ctrl+n", Action::CursorDown),
            ("Ctrl+p", Action::CursorUp),
            ("Enter", Action::Open),
            ("-", Action::GoParent),
            ("g", Action::Reload),
            ("Space", Action::ToggleExpand),
            // File operations
            ("+", Action::NewFile),
            ("d", Action::NewDirectory),
            ("Delete", Action::Delete),
            ("Backspace", Action::Delete),
            ("r", Action::Rename),
            // Filter
            ("/", Action::Search),
            ("Esc", Action::CloseSearch),
            // System
            ("?", Action::Help),
            ("q", Action::Quit),
            ("Ctrl+c", Action::Quit),
        ])
    }
}

impl Keymap {
    /// Bindings active while the search bar has focus. Printable keys edit
    /// the query, so only control keys are bound here.
    pub fn search() -> Self {
        Self::from_pairs(&[
            ("Ctrl+n", Action::CursorDown),
            ("Ctrl+p", Action::CursorUp),
            ("Down", Action::CursorDown),
            ("Up", Action::CursorUp),
            ("Enter", Action::Open),
            ("Esc", Action::CloseSearch),
            ("Ctrl+c", Action::Quit),
        ])
    }

    fn from_pairs(pairs: &[(&str, Action)]) -> Self {
        let bindings: HashMap<String, Action> = pairs
            .iter()
            .map(|(key, action)| ((*key).to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}
