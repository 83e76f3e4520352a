use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Production calendar generator for film projects
#[derive(Parser, Debug)]
#[command(name = "shootcal")]
#[command(version, about = "Production calendar generator for film projects")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a project's calendar, merging earlier edits
    Generate(GenerateArgs),
    /// Swap a shoot day with another date
    MoveDay(MoveDayArgs),
    /// Print department, location and area counts
    Counts(CountsArgs),
    /// Print a single calendar day
    ShowDay(ShowDayArgs),
}

/// Where to find a project.
#[derive(clap::Args, Debug)]
pub struct ProjectArgs {
    /// Project id (directory name under <data-dir>/projects)
    #[arg(short, long)]
    pub project: String,

    /// Data directory
    #[arg(long, env = "SHOOTCAL_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Ignore the stored calendar instead of merging from it
    #[arg(long)]
    pub fresh: bool,

    /// Save the result to calendar.json
    #[arg(long)]
    pub write: bool,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct MoveDayArgs {
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Date of the shoot day to move (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Destination date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Move mode: swap
    #[arg(long, default_value = "swap")]
    pub mode: String,

    /// Save the result to calendar.json
    #[arg(long)]
    pub write: bool,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct CountsArgs {
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowDayArgs {
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Date to show (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
