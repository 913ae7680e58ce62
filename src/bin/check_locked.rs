//! check-locked -- prints LOCKED or UNLOCKED.
//!
//! Usage: check-locked [--config <file>]

use std::process;

use lockprobe::cli::{self, EXIT_FAILURE};
use lockprobe::{lock, platform, Config};

fn main() {
    cli::init_logging();

    let invocation = cli::split_args(std::env::args_os().skip(1));
    if !invocation.positional.is_empty() {
        log::debug!("check-locked: ignoring arguments {:?}", invocation.positional);
    }
    if invocation.dangling_config {
        log::warn!("check-locked: --config given without a file; using defaults");
    }

    let config = match Config::load_or_default(invocation.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("check-locked: {e}");
            process::exit(EXIT_FAILURE);
        }
    };
    let policy = config.lock_policy();

    let state = match platform::create_window_source() {
        Ok(source) => lock::probe(source.as_ref(), &policy),
        Err(e) => {
            log::warn!("check-locked: {e}; assuming no windows");
            lock::classify(std::iter::empty(), &policy)
        }
    };

    println!("{state}");
}
