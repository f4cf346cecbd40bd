use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// A minimal single-table record store with an interactive prompt
#[derive(Parser)]
#[command(name = "rowstore", version)]
struct Args {
    /// Path to the database file (created if absent)
    file: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = rowstore::repl::run(&args.file) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
