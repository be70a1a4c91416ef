//! Message contract between a view and the controller.
//!
//! The view translates user input into [`Command`]s, which the controller
//! processes one at a time and answers with an optional [`Event`]. Both
//! sides serialize to JSON of the shape
//! `{ "command": <name>, "path"?, "type"?, "index"?, "cursorIndex"? }`,
//! so a non-Rust view can drive the same core.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::EntryKind;
use crate::nav::render::DisplayRow;

/// A request from the view.
///
/// Commands flow **view → controller**. Paths are relative to the panel's
/// current directory. The `type` discriminant of the create commands is
/// validated into [`EntryKind`] on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Enter a directory, go up on `..`, or hand a file to the opener.
    Open {
        path: String,
        #[serde(rename = "cursorIndex", default, skip_serializing_if = "Option::is_none")]
        cursor_index: Option<usize>,
    },
    /// Toggle the nested listing of the directory row at `index`.
    Expand { path: String, index: usize },
    /// Remove an entry without asking.
    Delete { path: String },
    /// Ask the user, then remove on an explicit yes.
    ConfirmDelete { path: String },
    /// Ask for a new name and rename.
    RequestRename { path: String },
    /// Ask for a name and create an empty file next to (or inside) `path`.
    CreateNewFile {
        path: String,
        #[serde(rename = "type")]
        kind: EntryKind,
    },
    /// Ask for a name and create a directory next to (or inside) `path`.
    CreateNewDir {
        path: String,
        #[serde(rename = "type")]
        kind: EntryKind,
    },
    /// Re-read the current directory.
    Reload,
    /// Move the cursor up one visible row (wrapping).
    CursorUp,
    /// Move the cursor down one visible row (wrapping).
    CursorDown,
    /// Replace the filter query.
    Filter { query: String },
}

impl Command {
    /// Decodes a view message.
    ///
    /// # Errors
    ///
    /// [`CoreError::Protocol`] for malformed JSON, unknown command names,
    /// missing fields or an unknown `type`.
    pub fn from_json(message: &str) -> CoreResult<Self> {
        serde_json::from_str(message).map_err(|e| CoreError::Protocol(e.to_string()))
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Protocol(e.to_string()))
    }

    /// The protocol name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Expand { .. } => "expand",
            Self::Delete { .. } => "delete",
            Self::ConfirmDelete { .. } => "confirmDelete",
            Self::RequestRename { .. } => "requestRename",
            Self::CreateNewFile { .. } => "createNewFile",
            Self::CreateNewDir { .. } => "createNewDir",
            Self::Reload => "reload",
            Self::CursorUp => "cursorUp",
            Self::CursorDown => "cursorDown",
            Self::Filter { .. } => "filter",
        }
    }
}

/// A notification back to the view.
///
/// Events flow **controller → view**.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Event {
    /// A directory row was toggled. `rows` holds the nested children when
    /// `expanded`, and is empty after a collapse.
    RenderExpand {
        rows: Vec<DisplayRow>,
        index: usize,
        expanded: bool,
    },
    /// The listing was (re)read.
    DirectoryLoaded { path: PathBuf, cursor: usize },
    /// A non-directory was handed to the opener.
    Opened { path: PathBuf },
    /// The cursor moved or the filter changed.
    Cursor { index: usize },
}

impl Event {
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Protocol(e.to_string()))
    }
}
