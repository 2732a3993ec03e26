//! Equivalence scoring through the Alloy module differ.

use crate::classifier;
use crate::command::ToolCommand;
use crate::config::ScoringConfig;
use crate::error::{Result, ScoreError};
use crate::runner::ToolRunner;
use crate::score::Score;
use std::path::Path;
use tracing::{debug, info, warn};

/// Scores whether a generated model is equivalent to its original.
pub struct EquivalenceScorer<'a> {
    config: &'a ScoringConfig,
    runner: &'a dyn ToolRunner,
}

impl<'a> EquivalenceScorer<'a> {
    pub fn new(config: &'a ScoringConfig, runner: &'a dyn ToolRunner) -> Self {
        Self { config, runner }
    }

    /// Compare `original` against `generated` with the module differ.
    ///
    /// Checks, in order, the differ jar, the original model and the generated
    /// model, and fails on the first one missing without launching the
    /// differ. Once launched, every outcome other than the equivalence marker
    /// in the differ's output scores zero.
    pub async fn score(&self, original: &Path, generated: &Path) -> Result<Score> {
        let jar = self.preflight(original, generated)?;

        let command = ToolCommand::module_diff(self.config, jar, original, generated);

        info!(
            original = %original.display(),
            generated = %generated.display(),
            scope = self.config.scope,
            solver = %self.config.solver,
            "Checking equivalence"
        );

        let equivalent = match self.runner.run(&command).await {
            Ok(output) => {
                let combined = output.combined();
                debug!(exit_code = output.exit_code, output = %combined, "Module differ finished");
                classifier::reports_equivalence(&combined)
            }
            Err(e) => {
                warn!(error = %e, "Module differ did not complete, scoring as not equivalent");
                false
            }
        };

        info!(equivalent, "Equivalence check complete");
        Ok(Score::from_passed(equivalent))
    }

    /// The differ jar, once it and both inputs are known to exist.
    pub fn preflight(&self, original: &Path, generated: &Path) -> Result<&'a Path> {
        let jar = self.config.artifacts.require_diff_jar()?;
        require_input("Original", original)?;
        require_input("Generated", generated)?;
        Ok(jar)
    }
}

fn require_input(role: &'static str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ScoreError::MissingInput {
            role,
            path: path.to_path_buf(),
        })
    }
}
