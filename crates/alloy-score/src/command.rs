//! Tool invocation definitions.

use crate::config::{ScoringConfig, MODULE_DIFF_CLASS};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest timeout a command runs with.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Name of the module differ invocation.
pub const MODULE_DIFF: &str = "module_diff";

/// Name of the analyzer `exec` invocation.
pub const ANALYZER_EXEC: &str = "analyzer_exec";

/// A single external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Human-readable invocation name.
    pub name: String,

    /// Executable to launch.
    pub program: OsString,

    /// Arguments passed to the executable.
    pub args: Vec<OsString>,

    /// Timeout in seconds, raised to [`MIN_TIMEOUT_SECS`] when lower.
    pub timeout_secs: u64,

    /// Directory to run in; inherits the caller's when `None`.
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// `<java> -cp <jar> ModuleDiff <original> <generated> Equivalence <scope> false <solver>`
    pub fn module_diff(
        config: &ScoringConfig,
        diff_jar: &Path,
        original: &Path,
        generated: &Path,
    ) -> Self {
        let args = vec![
            OsString::from("-cp"),
            diff_jar.as_os_str().to_owned(),
            OsString::from(MODULE_DIFF_CLASS),
            original.as_os_str().to_owned(),
            generated.as_os_str().to_owned(),
            OsString::from("Equivalence"),
            OsString::from(config.scope.to_string()),
            OsString::from("false"),
            OsString::from(&config.solver),
        ];
        Self::custom(MODULE_DIFF, &config.java, args, config.timeout_secs)
    }

    /// `<java> -jar <jar> exec -f <model>`, run inside `workdir`.
    pub fn analyzer_exec(
        config: &ScoringConfig,
        analyzer_jar: &Path,
        model: &Path,
        workdir: &Path,
    ) -> Self {
        let args = vec![
            OsString::from("-jar"),
            analyzer_jar.as_os_str().to_owned(),
            OsString::from("exec"),
            OsString::from("-f"),
            model.as_os_str().to_owned(),
        ];
        Self::custom(ANALYZER_EXEC, &config.java, args, config.timeout_secs).in_dir(workdir)
    }

    /// Create an arbitrary invocation.
    pub fn custom(
        name: impl Into<String>,
        program: impl Into<OsString>,
        args: Vec<OsString>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            timeout_secs,
            current_dir: None,
        }
    }

    /// Run inside `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Wall-clock limit. Every invocation has one.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// Space-joined command line for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
