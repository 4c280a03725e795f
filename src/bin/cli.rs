//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Interactive CLI that fills an object-lock enabled bucket with GOVERNANCE
//! locked text objects.
//!
//! Connection settings come from the environment or a `.env` file:
//! ```bash
//! AWS_ENDPOINT_URL=10.21.0.10            # host[:port], http:// is assumed
//! AWS_ACCESS_KEY_ID=...
//! AWS_SECRET_ACCESS_KEY=...
//! AWS_DEFAULT_REGION=us-east-1           # optional
//!
//! s3-lockgen          # prompts for bucket, retention, count, prefix, start index
//! s3-lockgen -vv      # same, with debug logging on stderr
//! ```

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use s3lockgen::{
    ClientConfig, LockedObjectStore, Prompter, SessionOptions, SessionOutcome, connect,
    run_session,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Turn on verbose logging, counts the number of v's
    #[arg(short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity: -v = Info, -vv = Debug",
    )]
    verbose: u8,
}

/// Default filter for a `-v` count; `RUST_LOG` overrides it.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",        // no -v: WARN level
        1 => "info",        // -v: INFO level
        _ => "debug",       // -vv or more: DEBUG level
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr, so prompts and progress dots on stdout stay readable.
    // init() also bridges `log` records from dependencies.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose))))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    println!("Connecting to S3 endpoint...");
    let cfg = ClientConfig::from_env().context("S3 configuration is incomplete")?;
    debug!("using {cfg:?}");

    let store = connect(&cfg).await?;
    println!("\t- S3 connection successful.");
    let store: Arc<dyn LockedObjectStore> = Arc::new(store);

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    match run_session(store, &mut prompter, &SessionOptions::default()).await? {
        SessionOutcome::NoBuckets => Ok(()),
        SessionOutcome::Completed(report) if report.is_success() => Ok(()),
        SessionOutcome::Completed(report) => {
            bail!("{} of {} uploads failed", report.failed(), report.requested)
        }
    }
}
