//! CLI argument definitions using clap
//!
//! Commands:
//! - docfilter compile --config <path> --schema <id>
//! - docfilter find --config <path> --schema <id> --data <file>
//! - docfilter operators --category <name>
//! - docfilter paths --config <path> --schema <id>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docfilter - compile schema-typed queries into document-store filters
#[derive(Parser, Debug)]
#[command(name = "docfilter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log compilation detail to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one query read from stdin and print the filter
    Compile {
        /// Path to configuration file
        #[arg(long, default_value = "./docfilter.json")]
        config: PathBuf,

        /// Identifier of the schema to compile against
        #[arg(long)]
        schema: String,
    },

    /// Compile one query read from stdin and run it over a document file
    Find {
        /// Path to configuration file
        #[arg(long, default_value = "./docfilter.json")]
        config: PathBuf,

        /// Identifier of the schema to compile against
        #[arg(long)]
        schema: String,

        /// JSON file holding a list of documents
        #[arg(long)]
        data: PathBuf,

        /// Page size (defaults to the configured default_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Matches to skip before the page starts
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Field path to sort matches by
        #[arg(long)]
        sort: Option<String>,

        /// Sort in descending order
        #[arg(long, requires = "sort")]
        descending: bool,
    },

    /// Print the operator table of a category
    Operators {
        /// Category name, e.g. "number" or "stringArray"
        #[arg(long)]
        category: String,
    },

    /// Print the queryable paths of a schema
    Paths {
        /// Path to configuration file
        #[arg(long, default_value = "./docfilter.json")]
        config: PathBuf,

        /// Schema identifier
        #[arg(long)]
        schema: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
