//! CLI module for docfilter
//!
//! Provides command-line interface for:
//! - compile: one-shot query compilation
//! - find: one-shot compilation and execution over a document file
//! - operators: operator table of a category
//! - paths: queryable paths of a schema
//!
//! stdout carries JSON responses only; logs go to stderr.

mod args;
mod commands;
mod errors;
mod io;

use tracing_subscriber::EnvFilter;

pub use args::{Cli, Command};
pub use commands::{
    compile, compile_query, find, find_documents, operator_table, run_command, schema_paths,
    Config,
};
pub use errors::{CliError, CliResult};
pub use io::{read_request, write_error, write_response};

/// Parse arguments, install logging and run the command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    run_command(cli.command)
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, falling
/// back to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
