//! tap -- synthetic left-click at a screen coordinate.
//!
//! Usage: tap [--config <file>] <x> <y>
//!
//! Exit codes: 0 tapped, 1 bad arguments, 2 config or injection failure.

use std::process;

use lockprobe::cli::{self, EXIT_FAILURE};
use lockprobe::{platform, tap, Config};

fn main() {
    cli::init_logging();

    let invocation = cli::split_args(std::env::args_os().skip(1));

    // Argument errors are checked before anything touches the OS.
    let point = match tap::parse_point(&invocation.positional) {
        Ok(p) if !invocation.dangling_config => p,
        _ => {
            println!("{}", tap::USAGE);
            process::exit(1);
        }
    };

    let config = match Config::load_or_default(invocation.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tap: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    let result = platform::create_pointer_injector()
        .and_then(|injector| tap::tap(injector.as_ref(), point, &config.tap_timing()));
    if let Err(e) = result {
        eprintln!("tap: {e}");
        process::exit(EXIT_FAILURE);
    }

    println!("Tapped at {point}");
}
