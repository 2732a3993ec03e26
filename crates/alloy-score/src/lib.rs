//! Alloy Score - pass/fail scoring of Alloy models
//!
//! Drives the Alloy tool chain as subprocesses and reduces its output to
//! binary scores:
//! - Syntax validation through the Alloy Analyzer's `exec` mode
//! - Equivalence checking through the Alloy module differ
//! - A combined pipeline that produces a serializable score report

pub mod classifier;
pub mod command;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod score;
pub mod syntax;
pub mod telemetry;
pub mod workdir;

// Re-export key types
pub use command::ToolCommand;
pub use config::{ScoringConfig, ToolArtifacts};
pub use equivalence::EquivalenceScorer;
pub use error::{Result, RunError, ScoreError};
pub use pipeline::{ModelDigest, ScoreReport, ScoringMode, ScoringPipeline};
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};
pub use score::Score;
pub use syntax::SyntaxValidator;
pub use telemetry::init_tracing;
pub use workdir::{ScratchGuard, ToolWorkdir};
