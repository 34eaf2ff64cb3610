//! StackKV CLI
//!
//! Interactive shell over an in-memory transactional store.

use std::io;

use clap::Parser;
use stackkv::shell::Repl;
use stackkv::{Config, StoreVariant};
use tracing_subscriber::{fmt, EnvFilter};

/// StackKV interactive shell
#[derive(Parser, Debug)]
#[command(name = "stackkv")]
#[command(about = "In-memory key-value store with nested transactions")]
#[command(version)]
struct Args {
    /// Use the thread-safe store variant
    #[arg(short, long)]
    concurrent: bool,

    /// Log every store operation
    #[arg(short, long)]
    verbose: bool,

    /// Prompt shown before each command
    #[arg(short, long, default_value = "> ")]
    prompt: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so they don't interleave with replies on stdout.
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let variant = if args.concurrent {
        StoreVariant::Concurrent
    } else {
        StoreVariant::Synchronous
    };

    let config = Config::builder()
        .variant(variant)
        .log_operations(args.verbose)
        .prompt(args.prompt)
        .build();

    tracing::debug!("StackKV v{} starting with {:?}", stackkv::VERSION, config);

    let store = config.open_store();
    let stdin = io::stdin();
    let mut repl =
        Repl::new(&*store, stdin.lock(), io::stdout()).with_prompt(config.prompt.clone());

    match repl.run() {
        Ok(executed) => tracing::debug!("Shell closed after {} commands", executed),
        Err(e) => {
            tracing::error!("Shell error: {}", e);
            std::process::exit(1);
        }
    }
}
