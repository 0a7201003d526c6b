//! Runs the counting agent over a directory of transcripts and prints its
//! answer as pretty JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use acquire::extraction::{load_task_prompt, ExtractionOrchestrator};
use acquire::tools::InputDir;
use acquire_cli::{logging, CliError, OllamaAgent, ServiceConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Count messages per speaker with a tool-using agent", long_about = None)]
struct Cli {
    /// Maximum number of agent runs before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: u32,

    /// Log tool calls and intermediate model output
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding task.md and format.md
    #[arg(long, default_value = "spec")]
    spec_dir: PathBuf,

    /// Directory of transcripts the agent may read (defaults to <spec-dir>/inputs)
    #[arg(long)]
    inputs: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(answer) => {
            println!("{answer}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = ServiceConfig::resolve(None, None)?;
    let task = load_task_prompt(&cli.spec_dir)?;
    let inputs = cli.inputs.unwrap_or_else(|| cli.spec_dir.join("inputs"));
    let inputs = InputDir::open(&inputs).map_err(|e| {
        CliError::Config(format!("input directory {}: {e}", inputs.display()))
    })?;

    tracing::info!(model = %config.model, inputs = %inputs.root().display(), "Starting count agent");
    let agent = OllamaAgent::new(&config, inputs)?;
    let orchestrator = ExtractionOrchestrator::new().max_attempts(cli.max_attempts as usize);

    let extraction = orchestrator.extract(&agent, &task).await?;
    tracing::debug!(
        attempts = extraction.metrics.total_attempts,
        wall_time = ?extraction.metrics.wall_time,
        "Extraction succeeded"
    );

    serde_json::to_string_pretty(&extraction.value)
        .map_err(|e| CliError::Config(format!("cannot render answer: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["count-agent"]).unwrap();
        assert_eq!(cli.max_attempts, 3);
        assert!(!cli.verbose);
        assert_eq!(cli.spec_dir, PathBuf::from("spec"));
        assert!(cli.inputs.is_none());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(Cli::try_parse_from(["count-agent", "--max-attempts", "0"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "count-agent",
            "--max-attempts",
            "5",
            "-v",
            "--spec-dir",
            "task",
            "--inputs",
            "data",
        ])
        .unwrap();
        assert_eq!(cli.max_attempts, 5);
        assert!(cli.verbose);
        assert_eq!(cli.inputs, Some(PathBuf::from("data")));
    }
}
