//! Configuration management.
//!
//! User preferences ([`settings::Config`]) are stored as TOML and loaded at
//! startup. Key bindings ([`keymap::Keymap`]) are fixed.

pub mod keymap;
pub mod settings;
