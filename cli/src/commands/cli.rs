use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "taskrank",
    version,
    about = "Collect tasks and rank them with a remote prioritization service"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.taskrank/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the prioritization service.
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// smart, fastest, high-impact or deadline. Anything else means smart.
    #[arg(long, global = true)]
    pub strategy: Option<String>,

    /// Send no weights; the service applies its own defaults.
    #[arg(long, global = true, default_value_t = false)]
    pub use_service_weights: bool,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

/// Where the tasks come from. JSON input wins; the form flags are used only
/// when no JSON is given.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct InputArgs {
    /// Tasks as JSON: an array of task objects or {"tasks": [...]}.
    #[arg(long, group = "json_input")]
    pub input: Option<String>,

    #[arg(long, group = "json_input")]
    pub input_file: Option<PathBuf>,

    /// Read the JSON tasks from stdin.
    #[arg(long, group = "json_input")]
    pub stdin: bool,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub due_date: Option<String>,

    #[arg(long)]
    pub hours: Option<String>,

    #[arg(long)]
    pub importance: Option<String>,

    /// Comma-separated ids/titles, or a JSON array.
    #[arg(long)]
    pub deps: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct WeightsArgs {
    /// Strategy to show; all presets when omitted.
    pub name: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score tasks and print them with their priority labels.
    Analyze(AnalyzeArgs),
    /// Ask the service for its top three picks.
    Suggest(AnalyzeArgs),
    /// Print the scoring weights a strategy sends.
    Weights(WeightsArgs),
    /// Interactive session (the default).
    Session,
}
