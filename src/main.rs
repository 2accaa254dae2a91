// Copyright 2026 Magpie Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use magpie::cli;

#[derive(Parser)]
#[command(
    name = "magpie",
    about = "Magpie — pick any element on a live web page and copy it",
    version,
    after_help = "Run 'magpie <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a page and pick elements interactively
    Pick {
        /// Page URL (http/https)
        url: String,
        /// Override the UI locale (e.g. "en", "zh-CN")
        #[arg(long)]
        locale: Option<String>,
    },
    /// Grab one element non-interactively by CSS selector
    Grab {
        /// Page URL (http/https)
        url: String,
        /// CSS selector of the element
        #[arg(long, short)]
        selector: String,
        /// What to extract (text, html, table, value, src, href,
        /// background-image, custom)
        #[arg(long, short, default_value = "text")]
        kind: String,
        /// Property name for --kind custom
        #[arg(long)]
        property: Option<String>,
        /// Print only; do not touch the clipboard
        #[arg(long)]
        no_copy: bool,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "magpie=debug"
    } else if cli.quiet {
        "magpie=error"
    } else {
        "magpie=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Pick { url, locale } => cli::pick_cmd::run(&url, locale.as_deref()).await,
        Commands::Grab {
            url,
            selector,
            kind,
            property,
            no_copy,
        } => cli::grab_cmd::run(&url, &selector, &kind, property.as_deref(), no_copy).await,
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "magpie", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    result
}
