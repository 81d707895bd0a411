//! CDG REPL - line-oriented editor for causal diagrams.
//!
//! This is the entry point for the `cdg` binary.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cdg_repl::Repl;
use cdg_session::{init_tracing, EditorConfig};

#[derive(Debug, Parser)]
#[command(name = "cdg", version, about = "Causal diagram editor")]
struct Cli {
    /// Editor configuration (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging and graph stats after each command.
    #[arg(short, long)]
    verbose: bool,

    /// Command scripts to run before reading input.
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EditorConfig::load(cli.config.as_deref())
        .with_context(|| "failed to load editor configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let mut repl = Repl::new(config);
    repl.set_verbose(cli.verbose);

    for file in &cli.files {
        if let Err(e) = repl.run_file(file) {
            bail!("Error loading {}: {}", file.display(), e);
        }
    }

    // Enter interactive mode if stdin is a terminal
    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl.interactive();
    } else if cli.files.is_empty() {
        // Only read from stdin pipe if no files were passed
        let mut input = String::new();
        stdin
            .lock()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        if let Err(e) = repl.run_script(&input) {
            bail!("Error: {}", e);
        }
    }

    Ok(())
}
