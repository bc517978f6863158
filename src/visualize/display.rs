//! Best-effort on-screen display of saved visualizations.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Something that can show an image file to the user.
pub trait Viewer {
    /// Show the image at `path`.
    fn show(&self, path: &Path) -> Result<()>;
}

/// Opens images with the platform's default viewer.
///
/// Fails with [`Error::Display`] when there is no interactive session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    /// Create a system viewer.
    pub fn new() -> Self {
        Self
    }
}

impl Viewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<()> {
        if !session_available(|key| std::env::var(key).ok()) {
            return Err(Error::Display(
                "no graphical session (DISPLAY and WAYLAND_DISPLAY are unset)".to_string(),
            ));
        }

        let status = opener(path)
            .status()
            .map_err(|e| Error::Display(format!("failed to launch viewer: {}", e)))?;
        if !status.success() {
            return Err(Error::Display(format!("viewer exited with {}", status)));
        }
        Ok(())
    }
}

/// Outcome of a best-effort display attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// The image was handed to a viewer
    Shown,
    /// Display was not possible; the reason is informational only
    Skipped(String),
}

impl DisplayOutcome {
    /// Check if the image was shown.
    pub fn is_shown(&self) -> bool {
        matches!(self, DisplayOutcome::Shown)
    }
}

/// Try to show an image, turning any failure into a notice.
///
/// Never fails: display is optional and does not affect the outcome of a
/// run.
pub fn show_best_effort(viewer: &dyn Viewer, path: &Path) -> DisplayOutcome {
    match viewer.show(path) {
        Ok(()) => DisplayOutcome::Shown,
        Err(e) => {
            log::info!("Skipping display of {}: {}", path.display(), e);
            DisplayOutcome::Skipped(e.to_string())
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn session_available(lookup: impl Fn(&str) -> Option<String>) -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| lookup(*key).is_some_and(|value| !value.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn session_available(_lookup: impl Fn(&str) -> Option<String>) -> bool {
    true
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
