// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{commands, Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Inspect { file } => commands::inspect(&file),
        Commands::Render {
            results,
            keyword,
            escape,
            output,
        } => {
            let html = commands::render(&results, &keyword, escape)?;
            commands::emit(output.as_deref(), &html)
        }
        Commands::Safelist { output } => commands::emit(output.as_deref(), &commands::safelist_text()),
        Commands::Config { config } => {
            let json = commands::effective_config(config.as_deref())?;
            commands::emit(None, &format!("{}\n", json))
        }
    }
}
