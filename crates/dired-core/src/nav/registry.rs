//! Holds the single active panel.
//!
//! There is at most one panel at a time. [`create_or_show`] either
//! retargets the existing one or builds a new one; the registry is passed
//! in explicitly rather than living in a static.

use std::path::PathBuf;

use tracing::debug;

use crate::error::CoreResult;
use crate::fs::ops::FileSystem;
use crate::nav::controller::{Controller, ControllerOptions};

/// Owner of the active [`Controller`], if any.
#[derive(Debug)]
pub struct PanelRegistry<F: FileSystem> {
    active: Option<Controller<F>>,
}

impl<F: FileSystem> Default for PanelRegistry<F> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<F: FileSystem> PanelRegistry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Controller<F>> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Controller<F>> {
        self.active.as_mut()
    }

    /// Drops the active panel.
    pub fn dispose(&mut self) {
        if self.active.take().is_some() {
            debug!("panel disposed");
        }
    }
}

/// Reveals the active panel at `dir`, or creates one there.
///
/// An existing panel keeps its options and cursor memory; `fs` and
/// `options` are only used when a new panel is built.
///
/// # Errors
///
/// Fails if `dir` cannot be listed. An existing panel is left as it was.
pub fn create_or_show<F: FileSystem>(
    registry: &mut PanelRegistry<F>,
    fs: F,
    dir: PathBuf,
    focus: Option<PathBuf>,
    options: ControllerOptions,
) -> CoreResult<&mut Controller<F>> {
    if let Some(mut existing) = registry.active.take() {
        debug!(dir = %dir.display(), "revealing existing panel");
        let result = existing.retarget(dir, focus);
        let controller = registry.active.insert(existing);
        result?;
        return Ok(controller);
    }

    debug!(dir = %dir.display(), "creating panel");
    let controller = Controller::open_at(fs, dir, focus, options)?;
    Ok(registry.active.insert(controller))
}
