//! Working directory of the Alloy Analyzer.
//!
//! The analyzer's `exec` mode leaves `tmp/` and `output/` behind in whatever
//! directory it runs in. A [`ScratchGuard`] removes both when it goes out of
//! scope, so every exit path of a validation run cleans up after itself,
//! including early returns, timeouts and cancelled futures.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scratch directories the analyzer creates in its working directory.
pub const SCRATCH_DIRS: [&str; 2] = ["tmp", "output"];

/// Directory an analyzer run executes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolWorkdir {
    root: PathBuf,
}

impl ToolWorkdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The process's current directory.
    pub fn current() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Absolute paths of the scratch directories.
    pub fn scratch_paths(&self) -> Vec<PathBuf> {
        SCRATCH_DIRS.iter().map(|name| self.root.join(name)).collect()
    }

    /// Remove the scratch directories when the returned guard drops.
    pub fn guard(&self) -> ScratchGuard<'_> {
        ScratchGuard { workdir: self }
    }

    /// Remove the scratch directories now.
    ///
    /// Directories that do not exist are skipped; other failures are logged
    /// and do not stop the remaining removals.
    pub fn clean_scratch(&self) {
        for path in self.scratch_paths() {
            match std::fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "Removed scratch directory"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove scratch directory")
                }
            }
        }
    }
}

/// Cleans the analyzer's scratch directories on drop.
#[must_use = "scratch directories are removed when the guard is dropped"]
#[derive(Debug)]
pub struct ScratchGuard<'a> {
    workdir: &'a ToolWorkdir,
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.workdir.clean_scratch();
    }
}
