use dired_core::action::ActionRegistry;
use dired_core::config::keymap::Keymap;

/// Application mode: determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// The search bar has focus; the string is the query being typed.
    Search(String),
    Help,
}

/// View-level application state.
///
/// The listing itself lives in the core controller; `App` only tracks what
/// the terminal needs on top of it: the input mode, a one-line status
/// message, and the key bindings.
#[derive(Debug, Clone)]
pub struct App {
    mode: AppMode,
    status_message: Option<String>,
    should_quit: bool,
    keymap: Keymap,
    search_keymap: Keymap,
    action_registry: ActionRegistry,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: AppMode::Normal,
            status_message: None,
            should_quit: false,
            keymap: Keymap::default(),
            search_keymap: Keymap::search(),
            action_registry: ActionRegistry::new(),
        }
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn search_keymap(&self) -> &Keymap {
        &self.search_keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    /// The search query while the search bar is open.
    pub fn search_query(&self) -> Option<&str> {
        match &self.mode {
            AppMode::Search(query) => Some(query),
            _ => None,
        }
    }

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_status(self, message: impl Into<String>) -> Self {
        Self {
            status_message: Some(message.into()),
            ..self
        }
    }

    pub fn without_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }
}
