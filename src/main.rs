//! Quill CLI entry point
//!
//! Parses arguments and hands off to the CLI module; errors go to stderr and
//! the process exits non-zero.

use quill::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
