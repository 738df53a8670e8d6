//! sopdex - SOP section parsing and retrieval
//!
//! One operation per invocation: list documents, list or fetch sections,
//! search the corpus, refresh cached parses, or parse an arbitrary file.

use anyhow::Result;
use sopdex::cli::{get, list, parse_file, refresh, search, sections, Cli, Commands};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // SOP corpus directory
    let sop_dir = Path::new(&cli.path);

    // Execute command
    match cli.command {
        Commands::List(args) => list(sop_dir, &args, cli.format)?,
        Commands::Sections(args) => sections(sop_dir, &args, cli.format)?,
        Commands::Get(args) => get(sop_dir, &args, cli.format)?,
        Commands::Search(args) => search(sop_dir, &args, cli.format)?,
        Commands::Refresh(args) => refresh(sop_dir, &args, cli.format)?,
        Commands::Parse(args) => parse_file(&args, cli.format)?,
    }

    Ok(())
}
