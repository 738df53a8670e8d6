//! CLI interface using clap
//!
//! The binary is the request/response boundary of the engine: one operation
//! per invocation, result printed as text or JSON for the calling client.

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};

/// sopdex - SOP section parsing and retrieval
#[derive(Parser, Debug)]
#[command(name = "sopdex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the directory containing SOP documents
    #[arg(short, long, global = true, default_value = ".")]
    pub path: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the documents discovered in the corpus
    List(ListArgs),

    /// List the numbered sections of one document
    Sections(SectionsArgs),

    /// Fetch a single section by number
    Get(GetArgs),

    /// Search every document's sections for a query
    Search(SearchArgs),

    /// Re-extract a document and replace its cached parse
    Refresh(RefreshArgs),

    /// Parse an arbitrary file and dump its section structure
    Parse(ParseArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show source paths alongside filenames
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for sections command
#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// Document id (filename without extension)
    pub document: String,
}

/// Arguments for get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Document id (filename without extension)
    pub document: String,

    /// Section number, e.g. "2.1"
    pub number: String,
}

/// Arguments for search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    /// Maximum number of hits to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for refresh command
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Document id; omit to refresh the whole corpus
    pub document: Option<String>,
}

/// Arguments for parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// File to parse (need not live in the corpus)
    pub file: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
