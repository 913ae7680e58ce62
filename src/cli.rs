//! Process-level plumbing shared by both binaries.

use std::ffi::OsString;
use std::path::PathBuf;

/// Exit code for fatal platform or config failures.
pub const EXIT_FAILURE: i32 = 2;

/// Arguments left after the `--config` option is removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub positional: Vec<String>,
    /// `--config` was given without a value.
    pub dangling_config: bool,
}

/// Splits `--config <file>` / `--config=<file>` out of the argument list
/// (program name already removed). Everything else stays positional, so
/// negative coordinates such as `-5` are never mistaken for options.
pub fn split_args<I>(args: I) -> Invocation
where
    I: IntoIterator<Item = OsString>,
{
    let mut invocation = Invocation::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy();
        if text == "--config" {
            match args.next() {
                Some(path) => invocation.config = Some(PathBuf::from(path)),
                None => invocation.dangling_config = true,
            }
        } else if let Some(path) = text.strip_prefix("--config=") {
            invocation.config = Some(PathBuf::from(path));
        } else {
            invocation.positional.push(text.into_owned());
        }
    }

    invocation
}

/// Installs the stderr logger. Default level is warn; override with RUST_LOG.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
