//! deptabs CLI - dependency tabs for rendered documentation.
//!
//! Provides commands for:
//! - `transform`: Rewrite Maven dependency listings of rendered pages into
//!   Maven/Gradle/SBT/Ivy/Grapes tabs

mod commands;
mod error;
mod output;
mod pages;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::TransformArgs;
use output::Output;

/// deptabs - build-tool tabs for Maven dependency listings.
#[derive(Parser)]
#[command(name = "deptabs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform dependency listings of rendered pages.
    Transform(TransformArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Transform(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Transform(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
