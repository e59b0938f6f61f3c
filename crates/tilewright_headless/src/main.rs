//! Headless level editor runner.
//!
//! This binary runs the editor without graphics, controlled via JSON on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Interactive or piped session
//! cargo run -p tilewright_headless -- run --level assets/levels/tutorial.ron
//!
//! # With a custom editor config
//! cargo run -p tilewright_headless -- run --level level.ron --config assets/config/editor.ron
//!
//! # Print a level as ASCII
//! cargo run -p tilewright_headless -- render --level assets/levels/tutorial.ron
//! ```
//!
//! # Protocol
//!
//! Input (stdin): JSON commands, one per line
//! Output (stdout): JSON responses, one per line
//! Logs (stderr): Debug information
//!
//! See the protocol module for command/response format.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tilewright_core::config::EditorConfig;
use tilewright_core::level::{level_dir, Level};
use tilewright_headless::{
    ascii::{render_board, LEGEND},
    runner::{HeadlessConfig, HeadlessRunner},
    ProtocolError,
};

#[derive(Parser)]
#[command(name = "tilewright_headless")]
#[command(about = "Headless level editor runner for scripted sessions and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an editing session driven by JSON lines on stdin
    Run {
        /// Level file to load
        #[arg(short, long)]
        level: PathBuf,

        /// Editor config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output state after every editing command
        #[arg(long)]
        auto_state: bool,
    },

    /// Print a level as ASCII
    Render {
        /// Level file to load
        #[arg(short, long)]
        level: PathBuf,

        /// Editor config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Omit the legend line
        #[arg(long)]
        no_legend: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let result = match cli.command {
        Commands::Run {
            level,
            config,
            auto_state,
        } => cmd_run(level, config, auto_state),
        Commands::Render {
            level,
            config,
            no_legend,
        } => cmd_render(level, config, no_legend),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Runner failed");
            ExitCode::FAILURE
        }
    }
}

/// Run a single editing session on stdin/stdout
fn cmd_run(level: PathBuf, config: Option<PathBuf>, auto_state: bool) -> Result<(), ProtocolError> {
    tracing::info!(level = %level.display(), "Starting editing session");

    let config = HeadlessConfig {
        level_path: level,
        config_path: config,
        auto_state_output: auto_state,
    };

    let mut runner = HeadlessRunner::with_config(&config)?;
    runner.run(io::stdin().lock(), io::stdout().lock())
}

/// Print a level as ASCII
fn cmd_render(
    level: PathBuf,
    config: Option<PathBuf>,
    no_legend: bool,
) -> Result<(), ProtocolError> {
    let editor_config = match config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let tile_size = editor_config.tile_size;
    let parsed = Level::load(&level)?;
    let name = parsed.name.clone();
    let runner = HeadlessRunner::from_level(parsed, editor_config, &level_dir(&level))?;

    println!("{name}");
    print!("{}", render_board(runner.editor().board(), tile_size));
    if !no_legend {
        println!("{LEGEND}");
    }
    Ok(())
}
