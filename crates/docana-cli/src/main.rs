//! Docana CLI: the `docana` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            inputs,
            overrides,
            config,
            stats,
            out,
            rate_lines,
            season_count,
            json,
        } => commands::render::run(commands::render::Args {
            inputs,
            overrides,
            config,
            stats,
            out,
            rate_lines,
            season_count,
            json,
        }),

        Commands::Keys {
            inputs,
            overrides,
            config,
            json,
        } => commands::keys::run(inputs, overrides, config, json),
    }
}
