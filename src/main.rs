//! Trade ladder calculator - main entry point
//!
//! This binary provides two subcommands:
//! - plan: Compute a full entry/stop-loss/take-profit plan
//! - compare: Compare take-profit ladders of every spacing algorithm

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::PlanArgs;

#[derive(Parser, Debug)]
#[command(name = "trade-ladder")]
#[command(about = "DCA entry ladders with stop-loss and take-profit levels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute entry ladder, DCA, stop-loss and take-profit levels
    Plan {
        #[command(flatten)]
        args: PlanArgs,

        /// Print the plan as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare take-profit ladders of all algorithms for the same inputs
    Compare {
        #[command(flatten)]
        args: PlanArgs,
    },
}

fn setup_logging(verbose: bool, command_name: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console goes to stderr, stdout carries the report
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // Log file name pattern: {command}_{date}.log
    let mut log_path = None;
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let log_filename = format!(
                "{}_{}.log",
                command_name,
                chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
            );
            log_path = Some(dir.join(&log_filename));
            let file_appender = tracing_appender::rolling::never(dir, &log_filename);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_path {
        info!("Log file: {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Plan { .. } => "plan",
        Commands::Compare { .. } => "compare",
    };

    setup_logging(cli.verbose, command_name, cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Plan { args, json } => commands::plan::run(args, json),
        Commands::Compare { args } => commands::compare::run(args),
    }
}
