//! Scoring configuration and tool artifact lookup.

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the module differ jar.
pub const DIFF_JAR_NAME: &str = "alloy-diff.jar";

/// File name of the Alloy Analyzer distribution jar.
pub const ANALYZER_JAR_NAME: &str = "org.alloytools.alloy.dist.jar";

/// Main class of the module differ.
pub const MODULE_DIFF_CLASS: &str = "org.alloytools.alloy.diff.ModuleDiff";

/// Default Java launcher.
pub const DEFAULT_JAVA: &str = "java";

/// Default analysis scope for equivalence checks.
pub const DEFAULT_SCOPE: u32 = 3;

/// Default SAT solver for equivalence checks.
pub const DEFAULT_SOLVER: &str = "sat4j";

/// Default wall-clock limit for each tool invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Locations of the jars the scorers need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolArtifacts {
    /// Module differ jar.
    pub diff_jar: PathBuf,

    /// Alloy Analyzer jar.
    pub analyzer_jar: PathBuf,
}

impl ToolArtifacts {
    /// Expect both jars, under their standard names, inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            diff_jar: dir.join(DIFF_JAR_NAME),
            analyzer_jar: dir.join(ANALYZER_JAR_NAME),
        }
    }

    /// Expect both jars next to the running executable.
    pub fn beside_executable() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::in_dir(dir))
    }

    /// Module differ jar, or a missing-artifact error.
    pub fn require_diff_jar(&self) -> Result<&Path> {
        require_artifact("Alloy Diff JAR", &self.diff_jar)
    }

    /// Analyzer jar, or a missing-artifact error.
    pub fn require_analyzer_jar(&self) -> Result<&Path> {
        require_artifact("Alloy Analyzer JAR", &self.analyzer_jar)
    }
}

fn require_artifact<'a>(name: &'static str, path: &'a Path) -> Result<&'a Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ScoreError::MissingArtifact {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// Everything a scoring run needs to know about its environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Java launcher used to run both jars.
    pub java: PathBuf,

    /// Jar locations.
    pub artifacts: ToolArtifacts,

    /// Analysis scope passed to the module differ.
    pub scope: u32,

    /// Solver passed to the module differ.
    pub solver: String,

    /// Timeout in seconds for each tool invocation; never below one second.
    pub timeout_secs: u64,

    /// Directory the analyzer runs in; its `tmp` and `output` scratch
    /// directories are created and removed here.
    pub workdir: PathBuf,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            java: PathBuf::from(DEFAULT_JAVA),
            artifacts: ToolArtifacts::in_dir("."),
            scope: DEFAULT_SCOPE,
            solver: DEFAULT_SOLVER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workdir: PathBuf::from("."),
        }
    }
}

impl ScoringConfig {
    /// Look for the jars in `dir`.
    pub fn with_tools_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.artifacts = ToolArtifacts::in_dir(dir);
        self
    }

    pub fn with_java(mut self, java: impl Into<PathBuf>) -> Self {
        self.java = java.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }
}
