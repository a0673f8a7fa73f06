mod commands;
mod csv;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "cohort-ladder",
    version,
    about = "Cohort career-ladder simulator: merit versus luck"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the luck scenarios and write the history and outcome tables
    Run(RunArgs),
    /// Print the default configuration as JSON
    Config,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// JSON config file; missing keys use the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Records to collect per probe profile
    #[arg(long)]
    pub target: Option<usize>,

    /// RNG seed shared by every scenario
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn ceiling per scenario
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Luck factor to run (repeatable); replaces the default sweep
    #[arg(long = "luck")]
    pub luck: Vec<f64>,

    /// Directory for the output files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Command::Run(args) => commands::run(&args),
        Command::Config => {
            commands::print_default_config()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
