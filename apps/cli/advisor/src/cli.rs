use advisor_core::context::DEFAULT_FORECAST_TAIL;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "advisor", version, about = "Ask an AI advisor about liquor demand")]
pub struct Cli {
    /// Directory containing advisor.toml
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for advisor.log
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.verbose.then_some(LevelFilter::Debug)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a question, optionally grounded in sales and forecast data
    Ask(AskArgs),
    /// List models visible to the configured API key
    Models,
    /// Check the API key and configured model
    SelfTest,
}

#[derive(Debug, Clone, Args)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Plain-text file appended to the context
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// Sales table as JSON: {"categories": [...], "rows": [{"period", "values"}]}
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Forecast points as JSON: [{"period", "estimate", "lower", "upper"}]
    #[arg(long)]
    pub forecast: Option<PathBuf>,

    /// How many trailing forecast points to include
    #[arg(long, default_value_t = DEFAULT_FORECAST_TAIL)]
    pub forecast_tail: usize,

    /// Retry rate-limited and transport failures with backoff
    #[arg(long)]
    pub retry: bool,
}
