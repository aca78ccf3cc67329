//! songbook entry point
//!
//! Parses arguments and dispatches to the CLI module; failures are printed
//! to stderr with a non-zero exit status.

use songbook::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
