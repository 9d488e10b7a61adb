#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;
use treefind::cli::Args;
use treefind::find::TreeMatcher;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("treefind: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_tracing(default_level(args.verbose, args.quiet));

    std::fs::symlink_metadata(&args.root)
        .with_context(|| format!("{}: failed to resolve path", args.root.display()))?;

    let options = args.find_options();
    let matcher = args.mode.matcher();
    tracing::debug!(?options, mode = ?args.mode, "starting search");

    let found = TreeMatcher::new().find(&args.root, &args.pattern, &options, Some(&*matcher));
    tracing::info!(count = found.len(), "search finished");

    let terminator = if args.print0 { '\0' } else { '\n' };
    let mut out = BufWriter::new(io::stdout().lock());
    for path in &found {
        write!(out, "{}{terminator}", path.display()).context("failed to write results")?;
    }
    out.flush().context("failed to write results")?;
    Ok(())
}

/// Log level used when `RUST_LOG` is not set.
fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
