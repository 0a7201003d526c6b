//! Generates a batch of multi-speaker conversation transcripts that follow
//! the line grammar, one file per slot.

use std::path::PathBuf;
use std::process::ExitCode;

use acquire::transcript::{
    build_system_prompt, BatchConfig, BatchGenerator, BatchReport, DirectorySink, SlotObserver,
    SlotPlan, SpeakerPool, DEFAULT_FORMAT_RULES,
};
use acquire_cli::config::DEFAULT_GENERATOR_MODEL;
use acquire_cli::{logging, CliError, OllamaGenerator, ServiceConfig};
use clap::{Args, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate conversation transcripts with an LLM", long_about = None)]
struct Cli {
    #[command(flatten)]
    characters: CharacterSource,

    /// Number of transcripts to generate
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Approximate number of messages per transcript
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    messages: u32,

    /// Directory the transcripts are written to
    #[arg(long, default_value = "spec/inputs")]
    output_dir: PathBuf,

    /// Model to generate with
    #[arg(long, default_value = DEFAULT_GENERATOR_MODEL)]
    model: String,

    /// File with custom format rules for the system prompt
    #[arg(long)]
    format_spec: Option<PathBuf>,

    /// Log every attempt
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct CharacterSource {
    /// Comma-separated character names (lowercase a-z)
    #[arg(long)]
    characters: Option<String>,

    /// JSON file holding an array of character names
    #[arg(long)]
    characters_file: Option<PathBuf>,
}

impl CharacterSource {
    fn load(&self) -> Result<SpeakerPool, CliError> {
        let pool = match (&self.characters, &self.characters_file) {
            (Some(list), _) => SpeakerPool::parse_list(list)?,
            (None, Some(path)) => SpeakerPool::from_json_file(path)?,
            (None, None) => {
                return Err(CliError::Config(
                    "one of --characters or --characters-file is required".to_string(),
                ))
            }
        };
        Ok(pool)
    }
}

/// Prints per-slot progress to stdout.
struct ProgressPrinter;

impl SlotObserver for ProgressPrinter {
    fn slot_started(&mut self, plan: &SlotPlan, total: usize) {
        println!(
            "[{}/{total}] Generating {} with {:?}...",
            plan.index,
            plan.file_name(),
            plan.speakers
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(report) => {
            println!("\n{report}");
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<BatchReport, CliError> {
    let pool = cli.characters.load()?;
    let config = ServiceConfig::resolve(None, Some(cli.model))?;

    let format_rules = match &cli.format_spec {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("format spec {}: {e}", path.display()))
        })?,
        None => DEFAULT_FORMAT_RULES.to_string(),
    };

    let batch = BatchConfig::default()
        .with_count(cli.count as usize)
        .with_message_count(cli.messages as usize);
    let generator = BatchGenerator::new(pool, build_system_prompt(&format_rules), batch);
    let mut sink = DirectorySink::create(&cli.output_dir)?;
    let backend = OllamaGenerator::new(&config)?;
    let mut rng = StdRng::from_entropy();

    tracing::info!(
        model = %config.model,
        count = cli.count,
        output_dir = %cli.output_dir.display(),
        "Starting transcript generation"
    );
    Ok(generator
        .run(&backend, &mut rng, &mut sink, &mut ProgressPrinter)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_character_list() {
        let cli = Cli::try_parse_from([
            "generate-transcripts",
            "--characters",
            "alex,sam",
            "--count",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.count, 2);
        assert_eq!(cli.messages, 100);
        assert_eq!(cli.model, "gpt-oss:20b");
        assert_eq!(cli.output_dir, PathBuf::from("spec/inputs"));
        assert_eq!(cli.characters.load().unwrap().names(), ["alex", "sam"]);
    }

    #[test]
    fn test_character_sources_are_exclusive() {
        let both = Cli::try_parse_from([
            "generate-transcripts",
            "--characters",
            "alex,sam",
            "--characters-file",
            "names.json",
            "--count",
            "1",
        ]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["generate-transcripts", "--count", "1"]);
        assert!(neither.is_err());
    }

    #[test]
    fn test_count_is_required() {
        assert!(Cli::try_parse_from(["generate-transcripts", "--characters", "alex,sam"]).is_err());
    }

    #[test]
    fn test_invalid_name_is_rejected_on_load() {
        let cli = Cli::try_parse_from([
            "generate-transcripts",
            "--characters",
            "alex,Sam",
            "--count",
            "1",
        ])
        .unwrap();
        assert!(matches!(cli.characters.load(), Err(CliError::Speakers(_))));
    }
}
