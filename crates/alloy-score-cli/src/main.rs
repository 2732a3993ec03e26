//! Alloy Score CLI
//!
//! The `score` command grades a generated Alloy model against the original
//! it was meant to reproduce.
//!
//! ## Output
//!
//! - default: `Syntax Valid: <s>/<max>` and `Equivalence Score: <s>/<max>`
//! - `--equivalence-only`: a single `<s>/<max>` line
//! - `--format json`: a JSON score report
//!
//! Configuration problems (missing models or jars) print `Error: ...` to
//! stderr and exit with status 1.

use alloy_score::config::{DEFAULT_JAVA, DEFAULT_SCOPE, DEFAULT_SOLVER, DEFAULT_TIMEOUT_SECS};
use alloy_score::{ProcessRunner, ScoringConfig, ScoringMode, ScoringPipeline, ToolArtifacts};
use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "score")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score a generated Alloy model against its original", long_about = None)]
struct Cli {
    /// Reference Alloy model
    original_file: PathBuf,

    /// Generated Alloy model to score
    generated_file: PathBuf,

    /// Skip the syntax check and print only the equivalence score
    #[arg(long)]
    equivalence_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Java launcher used to run the Alloy tools
    #[arg(long, env = "ALLOY_JAVA", default_value = DEFAULT_JAVA)]
    java: PathBuf,

    /// Directory holding alloy-diff.jar and org.alloytools.alloy.dist.jar
    /// (default: directory of this executable)
    #[arg(long, env = "ALLOY_TOOLS_DIR")]
    tools_dir: Option<PathBuf>,

    /// Analysis scope for the equivalence check
    #[arg(long, env = "ALLOY_SCOPE", default_value_t = DEFAULT_SCOPE)]
    scope: u32,

    /// SAT solver for the equivalence check
    #[arg(long, env = "ALLOY_SOLVER", default_value = DEFAULT_SOLVER)]
    solver: String,

    /// Per-tool timeout in seconds
    #[arg(
        long,
        env = "ALLOY_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Directory the analyzer runs in (default: current directory)
    #[arg(long, env = "ALLOY_WORKDIR")]
    workdir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Score lines
    Text,
    /// JSON score report
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    alloy_score::init_tracing(cli.json_logs, level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    debug!(?config, "Resolved scoring configuration");

    let mode = if cli.equivalence_only {
        ScoringMode::EquivalenceOnly
    } else {
        ScoringMode::Combined
    };

    let report = ScoringPipeline::run(
        &config,
        &ProcessRunner,
        &cli.original_file,
        &cli.generated_file,
        mode,
    )
    .await?;

    match cli.format {
        OutputFormat::Text => {
            for line in report.lines() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ScoringConfig> {
    let artifacts = match &cli.tools_dir {
        Some(dir) => ToolArtifacts::in_dir(dir),
        None => ToolArtifacts::beside_executable()
            .context("Failed to locate the score executable")?,
    };

    let workdir = match &cli.workdir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create working directory {}", dir.display()))?;
            dir.clone()
        }
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    Ok(ScoringConfig {
        java: cli.java.clone(),
        artifacts,
        scope: cli.scope,
        solver: cli.solver.clone(),
        timeout_secs: cli.timeout_secs,
        workdir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["score", "a.als", "b.als"]).unwrap();
        assert_eq!(cli.original_file, PathBuf::from("a.als"));
        assert_eq!(cli.generated_file, PathBuf::from("b.als"));
        assert!(!cli.equivalence_only);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.scope, 3);
        assert_eq!(cli.solver, "sat4j");
        assert_eq!(cli.timeout_secs, 300);
    }

    #[test]
    fn test_cli_requires_two_files() {
        assert!(Cli::try_parse_from(["score"]).is_err());
        assert!(Cli::try_parse_from(["score", "a.als"]).is_err());
        assert!(Cli::try_parse_from(["score", "a.als", "b.als", "c.als"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        let err = Cli::try_parse_from(["score", "a.als", "b.als", "--timeout-secs", "0"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from(["score", "a.als", "b.als", "--timeout-secs", "1"]).is_ok());
    }

    #[test]
    fn test_build_config_with_tools_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "score",
            "a.als",
            "b.als",
            "--tools-dir",
            "/opt/alloy",
            "--workdir",
            dir.path().join("job").to_str().unwrap(),
            "--timeout-secs",
            "10",
        ])
        .unwrap();

        let config = build_config(&cli).unwrap();
        assert_eq!(config.artifacts, ToolArtifacts::in_dir("/opt/alloy"));
        assert_eq!(config.timeout_secs, 10);
        assert!(dir.path().join("job").is_dir());
    }

    #[test]
    fn test_build_config_defaults_to_exe_dir() {
        let cli = Cli::try_parse_from(["score", "a.als", "b.als"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.artifacts, ToolArtifacts::beside_executable().unwrap());
        assert_eq!(config.workdir, std::env::current_dir().unwrap());
    }
}
