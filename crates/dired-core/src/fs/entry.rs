//! Entry descriptors and the resolver that builds them.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CoreError, CoreResult};
use crate::fs::format::{format_date, format_mode, human_file_size};
use crate::fs::ops::FileSystem;

/// The closed set of entry kinds the panel distinguishes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
        }
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "directory" => Ok(Self::Directory),
            "symlink" => Ok(Self::Symlink),
            other => Err(CoreError::Protocol(format!("unknown entry type `{other}`"))),
        }
    }
}

/// One filesystem object as shown in a listing.
///
/// `Entry` is immutable: a fresh one is resolved on every directory read or
/// expansion. `mode`, `size` and `mtime` are already formatted for display.
/// `link_target` is empty unless `kind` is [`EntryKind::Symlink`], and may be
/// empty for a broken link too.
///
/// `name` is NFC-normalised for display; `file_name` is the name as stored
/// on disk and is what paths must be built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    file_name: String,
    kind: EntryKind,
    mode: String,
    size: String,
    mtime: String,
    link_target: String,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The on-disk name. Differs from [`Entry::name`] for decomposed
    /// Unicode names; non-UTF-8 bytes are replaced.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn mtime(&self) -> &str {
        &self.mtime
    }

    pub fn link_target(&self) -> &str {
        &self.link_target
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Resolves `name` inside `directory` into an [`Entry`].
///
/// The entry itself is not followed: a symlink reports its own mode, and its
/// target is read separately. A target that cannot be read is recorded as
/// an empty string so broken links still display.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if the entry vanished since it was listed.
/// - [`CoreError::PermissionDenied`] if it cannot be stat'ed.
pub fn resolve<F, N>(fs: &F, directory: &Path, name: N) -> CoreResult<Entry>
where
    F: FileSystem + ?Sized,
    N: AsRef<OsStr>,
{
    let name = name.as_ref();
    let path = directory.join(name);
    let stat = fs.stat(&path)?;

    let link_target = if stat.kind == EntryKind::Symlink {
        match fs.read_link(&path) {
            Ok(target) => target.to_string_lossy().into_owned(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable symlink target");
                String::new()
            }
        }
    } else {
        String::new()
    };

    let file_name = name.to_string_lossy().into_owned();
    Ok(Entry {
        name: file_name.as_str().nfc().collect(),
        file_name,
        kind: stat.kind,
        mode: format_mode(stat.mode),
        size: human_file_size(stat.size),
        mtime: format_date(stat.mtime),
        link_target,
    })
}

/// Reads `directory` and resolves each child, prefixed by a synthetic `.`
/// entry for the directory itself.
///
/// Children that vanish between listing and resolving are skipped.
///
/// # Errors
///
/// Fails if the directory itself cannot be listed or stat'ed, or if any
/// child fails for a reason other than [`CoreError::NotFound`].
pub fn read_listing<F: FileSystem + ?Sized>(fs: &F, directory: &Path) -> CoreResult<Vec<Entry>> {
    let children = fs.list_directory(directory)?;
    let mut entries = Vec::with_capacity(children.len() + 1);
    entries.push(resolve(fs, directory, ".")?);
    entries.extend(resolve_children(fs, directory, &children)?);
    Ok(entries)
}

/// Resolves a directory's children without the synthetic `.` entry.
pub fn read_children<F: FileSystem + ?Sized>(fs: &F, directory: &Path) -> CoreResult<Vec<Entry>> {
    let children = fs.list_directory(directory)?;
    resolve_children(fs, directory, &children)
}

fn resolve_children<F: FileSystem + ?Sized>(
    fs: &F,
    directory: &Path,
    children: &[(OsString, EntryKind)],
) -> CoreResult<Vec<Entry>> {
    let mut entries = Vec::with_capacity(children.len());
    for (name, _) in children {
        match resolve(fs, directory, name) {
            Ok(entry) => entries.push(entry),
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::ops::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_regular_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test.txt"), "hello").unwrap();

        let entry = resolve(&LocalFs, tmp.path(), "test.txt").unwrap();

        assert_eq!(entry.name(), "test.txt");
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.size().trim(), "5B");
        assert!(entry.mode().starts_with('-'));
        assert!(entry.mode().ends_with('@'));
        assert_eq!(entry.mtime().len(), 16);
        assert!(entry.link_target().is_empty());
    }

    #[test]
    fn resolve_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("subdir")).unwrap();

        let entry = resolve(&LocalFs, tmp.path(), "subdir").unwrap();

        assert!(entry.is_dir());
        assert!(entry.mode().starts_with('d'));
    }

    #[test]
    fn resolve_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(&LocalFs, tmp.path(), "ghost").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_symlink_records_target() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink("real.txt", tmp.path().join("link")).unwrap();

        let entry = resolve(&LocalFs, tmp.path(), "link").unwrap();

        assert_eq!(entry.kind(), EntryKind::Symlink);
        assert_eq!(entry.link_target(), "real.txt");
        assert!(entry.mode().starts_with('l'));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_broken_symlink_still_displays() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink("nowhere", tmp.path().join("dangling")).unwrap();

        let entry = resolve(&LocalFs, tmp.path(), "dangling").unwrap();

        assert_eq!(entry.kind(), EntryKind::Symlink);
        assert_eq!(entry.link_target(), "nowhere");
    }

    #[test]
    fn listing_starts_with_self_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let listing = read_listing(&LocalFs, tmp.path()).unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name(), ".");
        assert!(listing[0].is_dir());
        assert_eq!(listing[1].name(), "a.txt");
    }

    #[test]
    fn children_have_no_self_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let children = read_children(&LocalFs, tmp.path()).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), "a.txt");
    }

    #[test]
    fn listing_keeps_decomposed_names_reachable() {
        let tmp = TempDir::new().unwrap();
        let nfd = "cafe\u{301}.txt";
        fs::write(tmp.path().join(nfd), "").unwrap();
        fs::write(tmp.path().join("plain.txt"), "").unwrap();

        let listing = read_listing(&LocalFs, tmp.path()).unwrap();
        assert_eq!(listing.len(), 3);

        let entry = listing
            .iter()
            .find(|e| e.name() == "caf\u{e9}.txt")
            .unwrap();
        assert!(tmp.path().join(entry.file_name()).exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn listing_includes_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xffname")), "").unwrap();

        let listing = read_listing(&LocalFs, tmp.path()).unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[1].name(), "bad\u{fffd}name");
        assert_eq!(listing[1].kind(), EntryKind::File);
    }

    #[test]
    fn entry_kind_parses_protocol_strings() {
        assert_eq!("file".parse::<EntryKind>().unwrap(), EntryKind::File);
        assert_eq!(
            "directory".parse::<EntryKind>().unwrap(),
            EntryKind::Directory
        );
        assert_eq!("symlink".parse::<EntryKind>().unwrap(), EntryKind::Symlink);
        assert!(matches!(
            "socket".parse::<EntryKind>(),
            Err(CoreError::Protocol(_))
        ));
    }

    #[test]
    fn entry_kind_displays_lowercase() {
        assert_eq!(EntryKind::Directory.to_string(), "directory");
    }
}
