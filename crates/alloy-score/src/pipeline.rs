//! Scoring pipeline orchestration and reporting.

use crate::config::ScoringConfig;
use crate::equivalence::EquivalenceScorer;
use crate::error::Result;
use crate::runner::ToolRunner;
use crate::score::Score;
use crate::syntax::SyntaxValidator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Which checks a pipeline run performs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Syntax-check the generated model, then compare it to the original.
    #[default]
    Combined,

    /// Only compare the two models.
    EquivalenceOnly,
}

/// A scored model file and its content digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDigest {
    /// Path as given by the caller.
    pub path: PathBuf,

    /// SHA-256 of the file contents, hex encoded. Absent when the path is
    /// not a readable regular file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ModelDigest {
    /// Hash the file at `path`.
    ///
    /// Only regular files are opened. Anything else, or anything unreadable,
    /// is logged and left undigested.
    pub fn of_file(path: &Path) -> Self {
        let sha256 = match hash_regular_file(path) {
            Ok(digest) => Some(digest),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Model not digested");
                None
            }
        };
        Self {
            path: path.to_path_buf(),
            sha256,
        }
    }
}

fn hash_regular_file(path: &Path) -> std::io::Result<String> {
    if !std::fs::metadata(path)?.is_file() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}

/// Result of a complete scoring run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreReport {
    /// Reference model.
    pub original: ModelDigest,

    /// Model under evaluation.
    pub generated: ModelDigest,

    /// Syntax score of the generated model; absent in equivalence-only runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<Score>,

    /// Equivalence score.
    pub equivalence: Score,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl ScoreReport {
    /// Plain-text rendering, one score per line.
    pub fn lines(&self) -> Vec<String> {
        match self.syntax {
            Some(syntax) => vec![
                format!("Syntax Valid: {}", syntax),
                format!("Equivalence Score: {}", self.equivalence),
            ],
            None => vec![self.equivalence.to_string()],
        }
    }
}

/// Scoring orchestrator.
pub struct ScoringPipeline;

impl ScoringPipeline {
    /// Score `generated` against `original`.
    ///
    /// The checks run one after the other: syntax first (in combined mode),
    /// then equivalence. The differ jar and both inputs are checked before
    /// any tool launches. Missing jars and missing inputs abort the run; tool
    /// failures only lower the score.
    pub async fn run(
        config: &ScoringConfig,
        runner: &dyn ToolRunner,
        original: &Path,
        generated: &Path,
        mode: ScoringMode,
    ) -> Result<ScoreReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        info!(?mode, "Starting scoring run");

        let equivalence_scorer = EquivalenceScorer::new(config, runner);
        equivalence_scorer.preflight(original, generated)?;

        let syntax = match mode {
            ScoringMode::Combined => Some(
                SyntaxValidator::new(config, runner)
                    .check(generated)
                    .await?,
            ),
            ScoringMode::EquivalenceOnly => None,
        };

        let equivalence = equivalence_scorer.score(original, generated).await?;

        let report = ScoreReport {
            original: ModelDigest::of_file(original),
            generated: ModelDigest::of_file(generated),
            syntax,
            equivalence,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            syntax_valid = ?report.syntax.map(|s| s.passed()),
            equivalent = report.equivalence.passed(),
            duration_ms = report.duration_ms,
            "Scoring run complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(syntax: Option<Score>, equivalence: Score) -> ScoreReport {
        ScoreReport {
            original: ModelDigest {
                path: PathBuf::from("a.als"),
                sha256: Some("aa".to_string()),
            },
            generated: ModelDigest {
                path: PathBuf::from("b.als"),
                sha256: Some("bb".to_string()),
            },
            syntax,
            equivalence,
            started_at: Utc::now(),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_combined_lines() {
        let report = report(Some(Score::pass()), Score::fail());
        assert_eq!(
            report.lines(),
            vec!["Syntax Valid: 1/1".to_string(), "Equivalence Score: 0/1".to_string()]
        );
    }

    #[test]
    fn test_equivalence_only_lines() {
        let report = report(None, Score::pass());
        assert_eq!(report.lines(), vec!["1/1".to_string()]);
    }

    #[test]
    fn test_json_omits_syntax_when_skipped() {
        let value = serde_json::to_value(report(None, Score::pass())).unwrap();
        assert!(value.get("syntax").is_none());
        assert_eq!(value["equivalence"]["score"], 1);
        assert_eq!(value["generated"]["sha256"], "bb");
    }

    #[test]
    fn test_json_includes_syntax() {
        let value = serde_json::to_value(report(Some(Score::fail()), Score::fail())).unwrap();
        assert_eq!(value["syntax"]["score"], 0);
        assert_eq!(value["syntax"]["max_score"], 1);
    }

    #[test]
    fn test_model_digest_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.als");
        std::fs::write(&path, b"sig A {}").unwrap();

        let d1 = ModelDigest::of_file(&path);
        let d2 = ModelDigest::of_file(&path);
        assert_eq!(d1, d2);
        assert_eq!(d1.sha256.unwrap().len(), 64);
    }

    #[test]
    fn test_model_digest_changes_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.als");

        std::fs::write(&path, b"sig A {}").unwrap();
        let d1 = ModelDigest::of_file(&path);

        std::fs::write(&path, b"sig A { f: set A }").unwrap();
        let d2 = ModelDigest::of_file(&path);

        assert_ne!(d1.sha256, d2.sha256);
    }

    #[test]
    fn test_directory_is_not_digested() {
        let dir = tempfile::tempdir().unwrap();

        let digest = ModelDigest::of_file(dir.path());
        assert_eq!(digest.path, dir.path());
        assert_eq!(digest.sha256, None);

        let value = serde_json::to_value(&digest).unwrap();
        assert!(value.get("sha256").is_none());
    }

    #[test]
    fn test_missing_file_is_not_digested() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ModelDigest::of_file(&dir.path().join("gone.als")).sha256, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_is_not_opened() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("model.als");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        // Opening a FIFO with no writer would block.
        assert_eq!(ModelDigest::of_file(&fifo).sha256, None);
    }

    #[test]
    fn test_default_mode_is_combined() {
        assert_eq!(ScoringMode::default(), ScoringMode::Combined);
    }
}
