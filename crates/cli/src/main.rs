mod detect;
mod resolve;
mod ruleset;
mod telemetry;
mod validate;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Checklist schema for the resolve subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SchemaArg {
    Brain,
    Legacy,
}

/// Visa document requirement toolchain.
#[derive(Parser)]
#[command(name = "visado", version, about = "Visa document requirement toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rule-set file: condition syntax and version invariants
    Validate {
        /// Path to the rule-set JSON file
        file: PathBuf,
    },

    /// Resolve an applicant profile against a rule-set file
    Resolve {
        /// Path to the rule-set JSON file
        file: PathBuf,
        /// Path to the applicant profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// Checklist schema to emit
        #[arg(long, default_value = "brain", value_enum)]
        schema: SchemaArg,
    },

    /// Classify a raw checklist payload as brain, legacy, or unknown
    Detect {
        /// Path to the payload file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    telemetry::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Validate { file } => validate::run(&file, cli.output),
        Commands::Resolve {
            file,
            profile,
            schema,
        } => resolve::run(&file, &profile, schema, cli.output).await,
        Commands::Detect { file } => detect::run(&file, cli.output),
    };

    match outcome {
        Ok(()) => {}
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(1);
        }
    }
}
