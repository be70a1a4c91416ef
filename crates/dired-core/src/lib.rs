//! dired core library: UI-agnostic directory panel logic.
//!
//! `dired-core` implements a directory-browsing panel: resolving entries,
//! formatting them into fixed-width rows, expanding directories in place,
//! fuzzy filtering, and the controller that turns view commands into
//! filesystem operations. It is decoupled from any UI so that the terminal
//! frontend (`dired-tui`) or a JSON-speaking view can drive it.
//!
//! # Modules
//!
//! - [`fs`] - Filesystem trait, entry resolver, stat formatting.
//! - [`nav`] - Row rendering, filtering, navigation state, controller, panel registry.
//! - [`event`] - [`Command`] / [`Event`] protocol between view and controller.
//! - [`action`] - User-triggerable actions and their help metadata.
//! - [`config`] - TOML settings and the fixed key bindings.
//! - [`error`] - Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;

pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use fs::{Entry, EntryKind, FileSystem, LocalFs};
pub use nav::controller::{Controller, ControllerOptions, Opener, Prompter};
pub use nav::filter::{fuzzy_match, match_indices};
pub use nav::registry::{create_or_show, PanelRegistry};
pub use nav::render::{render, DisplayRow, INDENT_WIDTH};
pub use nav::state::{NavigationState, Step};

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
