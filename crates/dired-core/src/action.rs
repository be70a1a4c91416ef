//! User-triggerable actions.
//!
//! Every key the panel reacts to resolves to an [`Action`].
//! [`ActionRegistry`] carries the metadata (name, description, category)
//! shown in the help overlay.

/// Every user-triggerable action.
///
/// Variants carry no parameters; the selected row supplies the context at
/// dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorDown,
    CursorUp,
    Open,
    GoParent,
    Reload,
    ToggleExpand,
    // File operations
    NewFile,
    NewDirectory,
    Delete,
    Rename,
    // Filter
    Search,
    CloseSearch,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOps,
    Filter,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::FileOps => "File",
            Self::Filter => "Filter",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier (e.g. `"cursor_up"`).
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions, in help-overlay order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        use Action::*;
        use ActionCategory::*;

        let table: [(Action, &str, &str, &str, ActionCategory); 14] = [
            (CursorDown, "cursor_down", "Cursor Down", "Move to the next row", Navigation),
            (CursorUp, "cursor_up", "Cursor Up", "Move to the previous row", Navigation),
            (Open, "open", "Open", "Enter a directory or open a file", Navigation),
            (GoParent, "go_parent", "Go Parent", "Navigate to the parent directory", Navigation),
            (Reload, "reload", "Reload", "Re-read the current directory", Navigation),
            (
                ToggleExpand,
                "toggle_expand",
                "Expand",
                "Expand or collapse a directory in place",
                Navigation,
            ),
            (NewFile, "new_file", "New File", "Create an empty file", FileOps),
            (NewDirectory, "new_directory", "New Directory", "Create a directory", FileOps),
            (Delete, "delete", "Delete", "Delete the selected entry", FileOps),
            (Rename, "rename", "Rename", "Rename the selected entry", FileOps),
            (Search, "search", "Search", "Fuzzy filter the listing", Filter),
            (CloseSearch, "close_search", "Close Search", "Close the search bar and clear the filter", Filter),
            (Help, "help", "Help", "Show keyboard shortcuts", System),
            (Quit, "quit", "Quit", "Exit dired", System),
        ];

        let descriptors = table
            .into_iter()
            .map(|(action, id, name, description, category)| ActionDescriptor {
                action,
                id,
                name,
                description,
                category,
            })
            .collect();
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_descriptor() {
        let registry = ActionRegistry::new();
        for action in [
            Action::CursorDown,
            Action::CursorUp,
            Action::Open,
            Action::GoParent,
            Action::Reload,
            Action::ToggleExpand,
            Action::NewFile,
            Action::NewDirectory,
            Action::Delete,
            Action::Rename,
            Action::Search,
            Action::CloseSearch,
            Action::Help,
            Action::Quit,
        ] {
            assert!(registry.descriptor_for(action).is_some(), "{action:?}");
        }
    }

    #[test]
    fn ids_are_unique() {
        let registry = ActionRegistry::new();
        let mut ids: Vec<&str> = registry.all().iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.all().len());
    }

    #[test]
    fn descriptor_for_returns_metadata() {
        let registry = ActionRegistry::new();
        let desc = registry.descriptor_for(Action::Help).unwrap();
        assert_eq!(desc.id, "help");
        assert_eq!(desc.name, "Help");
        assert_eq!(desc.category, ActionCategory::System);
    }

    #[test]
    fn action_category_labels() {
        assert_eq!(ActionCategory::Navigation.label(), "Navigation");
        assert_eq!(ActionCategory::FileOps.label(), "File");
        assert_eq!(ActionCategory::Filter.label(), "Filter");
    }
}
