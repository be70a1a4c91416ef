//! Filesystem collaborator.
//!
//! The controller never touches `std::fs` directly; it goes through the
//! [`FileSystem`] trait so tests and alternative backends can be plugged in.
//! [`LocalFs`] is the implementation used by the TUI.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::EntryKind;

/// Raw stat fields for one filesystem object (not following symlinks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub kind: EntryKind,
    /// Type and permission bits in `st_mode` layout.
    pub mode: u32,
    pub size: u64,
    pub mtime: SystemTime,
}

/// Operations the panel needs from the underlying storage.
///
/// Every method may fail with an I/O error classified into [`CoreError`].
pub trait FileSystem {
    /// Lists the immediate children of `path` in iteration order.
    ///
    /// Names are returned exactly as stored so they can be joined back onto
    /// `path`; normalising them for display is the caller's job.
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<(OsString, EntryKind)>>;
    /// Stats `path` without following a final symlink.
    fn stat(&self, path: &Path) -> CoreResult<Stat>;
    /// Reads the target of the symlink at `path`.
    fn read_link(&self, path: &Path) -> CoreResult<PathBuf>;
    /// Removes a file, symlink or directory. Non-empty directories need `recursive`.
    fn remove(&self, path: &Path, recursive: bool) -> CoreResult<()>;
    fn rename(&self, from: &Path, to: &Path) -> CoreResult<()>;
    fn create_file(&self, path: &Path, contents: &[u8]) -> CoreResult<()>;
    fn create_directory(&self, path: &Path) -> CoreResult<()>;
    /// Returns `true` if anything (including a broken symlink) sits at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<(OsString, EntryKind)>> {
        let meta = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
        if !meta.is_dir() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }

        let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

        let mut children = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let file_type = match dir_entry.file_type() {
                Ok(t) => t,
                Err(_) => continue,
            };
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            children.push((dir_entry.file_name(), kind));
        }

        Ok(children)
    }

    fn stat(&self, path: &Path) -> CoreResult<Stat> {
        let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        Ok(Stat {
            kind,
            mode: mode_bits(&meta, kind),
            size: meta.len(),
            mtime: meta.modified().unwrap_or(UNIX_EPOCH),
        })
    }

    fn read_link(&self, path: &Path) -> CoreResult<PathBuf> {
        std::fs::read_link(path).map_err(|e| CoreError::from_io(e, path))
    }

    fn remove(&self, path: &Path, recursive: bool) -> CoreResult<()> {
        // symlink_metadata: a link to a directory is removed as a file
        let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

        let result = if meta.is_dir() {
            if recursive {
                std::fs::remove_dir_all(path)
            } else {
                std::fs::remove_dir(path)
            }
        } else {
            std::fs::remove_file(path)
        };
        result.map_err(|e| CoreError::from_io(e, path))
    }

    fn rename(&self, from: &Path, to: &Path) -> CoreResult<()> {
        std::fs::rename(from, to).map_err(|e| CoreError::from_io(e, from))
    }

    fn create_file(&self, path: &Path, contents: &[u8]) -> CoreResult<()> {
        use std::io::Write;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| CoreError::from_io(e, path))?;
        file.write_all(contents)
            .map_err(|e| CoreError::from_io(e, path))
    }

    fn create_directory(&self, path: &Path) -> CoreResult<()> {
        std::fs::create_dir(path).map_err(|e| CoreError::from_io(e, path))
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }
}

#[cfg(unix)]
fn mode_bits(meta: &std::fs::Metadata, _kind: EntryKind) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_bits(meta: &std::fs::Metadata, kind: EntryKind) -> u32 {
    let type_bits = match kind {
        EntryKind::Directory => 0o040_000,
        EntryKind::Symlink => 0o120_000,
        EntryKind::File => 0o100_000,
    };
    let perm_bits = if meta.permissions().readonly() { 0o555 } else { 0o755 };
    type_bits | perm_bits
}

/// Rejects names that would escape the target directory.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}
