//! Syntax validation through the Alloy Analyzer.

use crate::command::ToolCommand;
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::runner::ToolRunner;
use crate::score::Score;
use crate::workdir::ToolWorkdir;
use std::path::Path;
use tracing::{debug, info, warn};

/// Scores whether a model parses and type-checks.
pub struct SyntaxValidator<'a> {
    config: &'a ScoringConfig,
    runner: &'a dyn ToolRunner,
}

impl<'a> SyntaxValidator<'a> {
    pub fn new(config: &'a ScoringConfig, runner: &'a dyn ToolRunner) -> Self {
        Self { config, runner }
    }

    /// Run the analyzer's `exec` mode on `model`.
    ///
    /// Fails only when the analyzer jar is missing. A model that cannot be
    /// resolved scores zero without launching anything; so does any analyzer
    /// failure.
    pub async fn check(&self, model: &Path) -> Result<Score> {
        let jar = self.config.artifacts.require_analyzer_jar()?;

        // The analyzer runs in the workdir, so relative paths would resolve
        // against the wrong directory.
        let model = match std::fs::canonicalize(model) {
            Ok(model) => model,
            Err(e) => {
                warn!(
                    model = %model.display(),
                    error = %e,
                    "Model not resolvable, scoring as invalid"
                );
                return Ok(Score::fail());
            }
        };
        let jar = std::fs::canonicalize(jar)?;

        let workdir = ToolWorkdir::new(&self.config.workdir);
        let command = ToolCommand::analyzer_exec(self.config, &jar, &model, workdir.path());

        info!(model = %model.display(), workdir = %workdir.path().display(), "Checking syntax");

        let _scratch = workdir.guard();
        let valid = match self.runner.run(&command).await {
            Ok(output) => {
                debug!(
                    exit_code = output.exit_code,
                    stdout = %output.stdout,
                    stderr = %output.stderr,
                    "Analyzer finished"
                );
                output.passed()
            }
            Err(e) => {
                warn!(error = %e, "Analyzer did not complete, scoring as invalid");
                false
            }
        };

        info!(valid, "Syntax check complete");
        Ok(Score::from_passed(valid))
    }
}
