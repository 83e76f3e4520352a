use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod counts_cmd;
mod error;
mod generate_cmd;
mod move_cmd;
mod shared;
mod show_day_cmd;

use cli::{Cli, Commands};
use counts_cmd::run_counts;
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use generate_cmd::run_generate;
use move_cmd::run_move_day;
use show_day_cmd::run_show_day;

/// `warn` unless `--verbose`; `RUST_LOG` wins over both.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch<A>(
    args: A,
    raw_format: &str,
    run: fn(A, OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let fallback = output_format_hint(raw_format);
    let output_format = match parse_output_format(raw_format) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(args, output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    match cli.command {
        Commands::Generate(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_generate)
        }
        Commands::MoveDay(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_move_day)
        }
        Commands::Counts(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_counts)
        }
        Commands::ShowDay(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_show_day)
        }
    }
}
