//! Filesystem side of the panel.
//!
//! [`ops::FileSystem`] abstracts storage, [`entry`] resolves names into
//! display-ready [`entry::Entry`] values, and [`format`] holds the pure
//! stat-to-string helpers those entries are built with.

pub mod entry;
pub mod format;
pub mod ops;

pub use entry::{read_children, read_listing, resolve, Entry, EntryKind};
pub use format::{format_date, format_mode, human_file_size};
pub use ops::{FileSystem, LocalFs, Stat};
