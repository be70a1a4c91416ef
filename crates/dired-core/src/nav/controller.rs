//! The navigation/interaction controller.
//!
//! A [`Controller`] owns one panel's [`NavigationState`] and the injected
//! [`FileSystem`]. It handles one [`Command`] to completion at a time and
//! talks to the user through a host implementing [`Prompter`] and
//! [`Opener`]. Filesystem mutations that fail are reported through
//! [`Prompter::show_error`] and leave the state untouched.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::config::settings::GeneralConfig;
use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::entry::{read_children, read_listing, EntryKind};
use crate::fs::ops::{is_valid_filename, FileSystem};
use crate::nav::render::render;
use crate::nav::state::{NavigationState, Step};

/// User-facing questions and messages.
pub trait Prompter {
    /// Asks a yes/no question. Only `true` counts as consent.
    fn confirm(&mut self, message: &str) -> bool;
    /// Asks for a line of text. `None` means the user cancelled.
    fn input_text(&mut self, prompt: &str, default: Option<&str>) -> Option<String>;
    fn show_error(&mut self, message: &str);
}

/// Hands non-directory paths to an external viewer or editor.
pub trait Opener {
    fn open_document(&mut self, path: &Path) -> CoreResult<()>;
}

/// Controller behaviour switches, usually taken from [`GeneralConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub root: Option<PathBuf>,
    pub remember_cursor: bool,
    pub confirm_delete: bool,
    pub recursive_delete: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&GeneralConfig::default())
    }
}

impl From<&GeneralConfig> for ControllerOptions {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            root: general.root.as_deref().map(normalize),
            remember_cursor: general.remember_cursor,
            confirm_delete: general.confirm_delete,
            recursive_delete: general.recursive_delete,
        }
    }
}

/// Which kind of entry a create command makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NewEntry {
    File,
    Directory,
}

impl NewEntry {
    fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }

    fn collision_message(self, name: &str) -> String {
        match self {
            Self::File => format!("File \"{name}\" already exists."),
            Self::Directory => format!("Directory \"{name}\" already exists."),
        }
    }
}

/// Drives one panel.
#[derive(Debug)]
pub struct Controller<F: FileSystem> {
    fs: F,
    state: NavigationState,
    options: ControllerOptions,
}

impl<F: FileSystem> Controller<F> {
    /// Creates a controller at `dir` without reading it yet.
    pub fn new(fs: F, dir: PathBuf, options: ControllerOptions) -> Self {
        Self {
            fs,
            state: NavigationState::new(normalize(&dir)),
            options,
        }
    }

    /// Creates a controller and loads `dir`, placing the cursor on `focus`
    /// when it names an entry of `dir`.
    pub fn open_at(
        fs: F,
        dir: PathBuf,
        focus: Option<PathBuf>,
        options: ControllerOptions,
    ) -> CoreResult<Self> {
        let mut controller = Self::new(fs, dir.clone(), options);
        controller.retarget(dir, focus)?;
        Ok(controller)
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Moves the panel to `dir` with an optional focus request.
    ///
    /// # Errors
    ///
    /// Fails if `dir` cannot be listed; the state is unchanged.
    pub fn retarget(&mut self, dir: PathBuf, focus: Option<PathBuf>) -> CoreResult<()> {
        self.navigate(normalize(&dir), focus).map(|_| ())
    }

    /// Processes one command to completion.
    ///
    /// # Errors
    ///
    /// Only `expand` read failures and listing failures the user was not
    /// told about are returned; mutation failures go to `host.show_error`.
    pub fn handle<H>(&mut self, command: Command, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        debug!(command = command.name(), ?command, "handling command");

        match command {
            Command::Open { path, cursor_index } => self.open(&path, cursor_index, host),
            Command::Expand { path, index } => self.expand(&path, index),
            Command::Delete { path } => self.delete(&path, host),
            Command::ConfirmDelete { path } => {
                if self.options.confirm_delete
                    && !host.confirm(&format!("Are you sure you want to delete {path}?"))
                {
                    return Ok(None);
                }
                self.delete(&path, host)
            }
            Command::RequestRename { path } => self.rename(&path, host),
            Command::CreateNewFile { path, kind } => self.create(&path, kind, NewEntry::File, host),
            Command::CreateNewDir { path, kind } => {
                self.create(&path, kind, NewEntry::Directory, host)
            }
            Command::Reload => {
                let keep = self.state.cursor();
                self.refresh(Some(keep)).map(Some)
            }
            Command::CursorUp => Ok(Some(self.step(Step::Up))),
            Command::CursorDown => Ok(Some(self.step(Step::Down))),
            Command::Filter { query } => {
                self.update(|state| state.with_query(&query));
                Ok(Some(Event::Cursor {
                    index: self.state.cursor(),
                }))
            }
        }
    }

    fn update(&mut self, f: impl FnOnce(NavigationState) -> NavigationState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    fn step(&mut self, step: Step) -> Event {
        self.update(|state| state.step(step));
        Event::Cursor {
            index: self.state.cursor(),
        }
    }

    fn open<H>(&mut self, path: &str, cursor_index: Option<usize>, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        let here = self.state.current_dir().to_path_buf();
        let remembered = cursor_index.unwrap_or(self.state.cursor());
        self.update(|state| state.with_remembered_cursor(here.clone(), remembered));

        if path == ".." {
            if self.at_root() {
                debug!(dir = %here.display(), "already at root");
                return Ok(None);
            }
            let Some(parent) = here.parent().map(Path::to_path_buf) else {
                return Ok(None);
            };
            return self.enter(parent, Some(here), host);
        }

        let target = normalize(&here.join(path));
        match self.fs.stat(&target) {
            Ok(stat) if stat.kind == EntryKind::Directory => self.enter(target, None, host),
            Ok(_) => self.open_document(&target, host),
            Err(e) => {
                warn!(path = %target.display(), error = %e, "stat failed, opening raw path");
                self.open_document(Path::new(path), host)
            }
        }
    }

    fn enter<H>(&mut self, dir: PathBuf, focus: Option<PathBuf>, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        match self.navigate(dir, focus) {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                warn!(error = %e, "cannot enter directory");
                host.show_error(&e.to_string());
                Ok(None)
            }
        }
    }

    fn open_document<H>(&mut self, path: &Path, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        match host.open_document(path) {
            Ok(()) => Ok(Some(Event::Opened {
                path: path.to_path_buf(),
            })),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "open failed");
                host.show_error(&e.to_string());
                Ok(None)
            }
        }
    }

    fn expand(&mut self, path: &str, index: usize) -> CoreResult<Option<Event>> {
        let is_dir = self
            .state
            .flat_rows()
            .iter()
            .any(|row| row.path == path && row.is_dir());
        if !is_dir {
            return Ok(None);
        }

        if self.state.is_expanded(path) {
            self.update(|state| state.without_expansion(path));
            return Ok(Some(Event::RenderExpand {
                rows: Vec::new(),
                index,
                expanded: false,
            }));
        }

        let dir = self.state.current_dir().join(path);
        let children = read_children(&self.fs, &dir)?;
        let rows = render(path, &children, true);
        self.update(|state| state.with_expansion(path, rows.clone()));
        Ok(Some(Event::RenderExpand {
            rows,
            index,
            expanded: true,
        }))
    }

    fn delete<H>(&mut self, path: &str, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        if path == "." || path == ".." {
            host.show_error(&CoreError::InvalidName(path.to_string()).to_string());
            return Ok(None);
        }

        let target = normalize(&self.state.current_dir().join(path));
        match self.fs.remove(&target, self.options.recursive_delete) {
            Ok(()) => debug!(path = %target.display(), "deleted"),
            Err(e) if e.is_not_found() => {
                debug!(path = %target.display(), "already gone");
            }
            Err(e) => {
                warn!(path = %target.display(), error = %e, "delete failed");
                host.show_error(&e.to_string());
                return Ok(None);
            }
        }

        let keep = self.state.cursor();
        self.refresh_or_report(Some(keep), host)
    }

    fn rename<H>(&mut self, path: &str, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        if path == "." || path == ".." {
            host.show_error(&CoreError::InvalidName(path.to_string()).to_string());
            return Ok(None);
        }
        let Some(input) = host.input_text(&format!("Rename {path} to:"), Some(path)) else {
            return Ok(None);
        };
        let new_name = input.trim();
        if new_name.is_empty() || new_name == path {
            return Ok(None);
        }

        let here = self.state.current_dir().to_path_buf();
        let from = normalize(&here.join(path));
        let to = normalize(&here.join(new_name));
        if self.fs.exists(&to) {
            host.show_error(&CoreError::NameCollision(to).to_string());
            return Ok(None);
        }
        if let Err(e) = self.fs.rename(&from, &to) {
            warn!(from = %from.display(), to = %to.display(), error = %e, "rename failed");
            host.show_error(&e.to_string());
            return Ok(None);
        }

        let keep = self.state.cursor();
        self.update(|state| state.with_focus(Some(to)));
        self.refresh_or_report(Some(keep), host)
    }

    fn create<H>(
        &mut self,
        path: &str,
        kind: EntryKind,
        new: NewEntry,
        host: &mut H,
    ) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        let base_rel = if kind.is_dir() {
            path.to_string()
        } else {
            match path.rfind('/') {
                Some(i) => path[..i].to_string(),
                None => ".".to_string(),
            }
        };
        let base = normalize(&self.state.current_dir().join(&base_rel));

        let prompt = format!("New {} in {}", new.label(), base.display());
        let Some(input) = host.input_text(&prompt, None) else {
            return Ok(None);
        };
        let name = input.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if !is_valid_filename(name) {
            host.show_error(&CoreError::InvalidName(name.to_string()).to_string());
            return Ok(None);
        }

        let target = base.join(name);
        if self.fs.exists(&target) {
            host.show_error(&new.collision_message(name));
            return Ok(None);
        }
        let created = match new {
            NewEntry::File => self.fs.create_file(&target, b""),
            NewEntry::Directory => self.fs.create_directory(&target),
        };
        if let Err(e) = created {
            warn!(path = %target.display(), error = %e, "create failed");
            host.show_error(&e.to_string());
            return Ok(None);
        }

        let keep = self.state.cursor();
        self.update(|state| state.with_focus(Some(target)));
        self.refresh_or_report(Some(keep), host)
    }

    fn at_root(&self) -> bool {
        match &self.options.root {
            Some(root) => self.state.current_dir() == root.as_path(),
            None => self.state.current_dir().parent().is_none(),
        }
    }

    /// Reads `dir` and commits it as the new listing.
    fn navigate(&mut self, dir: PathBuf, focus: Option<PathBuf>) -> CoreResult<Event> {
        let preferred = if self.options.remember_cursor {
            self.state.remembered_cursor(&dir)
        } else {
            None
        };
        self.load(dir, focus, preferred)
    }

    /// Re-reads the current directory, preferring cursor `keep`.
    fn refresh(&mut self, keep: Option<usize>) -> CoreResult<Event> {
        let dir = self.state.current_dir().to_path_buf();
        let focus = self.state.focused().map(Path::to_path_buf);
        self.load(dir, focus, keep)
    }

    fn refresh_or_report<H>(&mut self, keep: Option<usize>, host: &mut H) -> CoreResult<Option<Event>>
    where
        H: Prompter + Opener + ?Sized,
    {
        match self.refresh(keep) {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                warn!(error = %e, "refresh failed");
                host.show_error(&e.to_string());
                Ok(None)
            }
        }
    }

    fn load(&mut self, dir: PathBuf, focus: Option<PathBuf>, preferred: Option<usize>) -> CoreResult<Event> {
        let entries = read_listing(&self.fs, &dir)?;
        let rows = render("", &entries, false);
        debug!(dir = %dir.display(), rows = rows.len(), "listing loaded");

        self.update(|state| {
            state
                .with_focus(focus)
                .with_listing(dir, rows, preferred)
        });
        Ok(Event::DirectoryLoaded {
            path: self.state.current_dir().to_path_buf(),
            cursor: self.state.cursor(),
        })
    }
}

/// Lexically normalises `path`: drops `.` components and folds `..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
