// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sifter command-line interface.
//!
//! Offline tooling around the widget. `inspect` checks that an index document
//! is something the widget will accept, `render` previews the fragment a hit
//! list turns into, `safelist` hands the CSS build the classes that only exist
//! inside the compiled WASM, and `config` shows what a partial configuration
//! resolves to.

pub mod commands;
pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sifter",
    about = "Tooling for the sifter client-side search widget",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise an elasticlunr index document
    Inspect {
        /// Path to search_index.<lang>.json
        file: String,
    },

    /// Render the results fragment for a JSON array of hits
    Render {
        /// JSON file holding the hit list, as returned by index.search()
        #[arg(short, long)]
        results: String,

        /// Keyword the hits were produced for
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// HTML-escape stored fields instead of trusting them
        #[arg(long)]
        escape: bool,

        /// Write the fragment here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the utility classes used by the result template, one per line
    Safelist {
        /// Write the list here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the effective widget configuration as JSON
    Config {
        /// Partial configuration file to resolve against the defaults
        #[arg(short, long)]
        config: Option<String>,
    },
}
