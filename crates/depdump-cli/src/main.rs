//! depdump CLI binary.
//!
//! Parses arguments with `clap`, initializes logging via `tracing`, and
//! hands the run to the dump operation.

mod cli;
mod dump;

use miette::Result;

fn main() -> Result<()> {
    let args = cli::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    dump::exec(args)
}
