//! Error types for alloy-score

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that stop scoring altogether.
///
/// These are configuration problems on the operator's side. Anything that
/// goes wrong inside the Alloy tools themselves is a [`RunError`] and ends
/// up as a score of zero instead.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// An input model file does not exist
    #[error("{role} file not found: {}", path.display())]
    MissingInput {
        /// Which input was missing ("Original" or "Generated")
        role: &'static str,
        path: PathBuf,
    },

    /// A tool artifact (jar) does not exist
    #[error("{name} not found at: {}", path.display())]
    MissingArtifact { name: &'static str, path: PathBuf },

    /// IO error while preparing a run
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single tool invocation.
#[derive(Error, Debug)]
pub enum RunError {
    /// Command had no program to execute
    #[error("tool {0} has empty command")]
    EmptyCommand(String),

    /// Process could not be launched or its output could not be collected
    #[error("tool {tool} failed to run: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exceeded its wall-clock limit and was killed
    #[error("tool {tool} timed out after {} seconds", limit.as_secs())]
    Timeout { tool: String, limit: Duration },
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoreError>;
