//! Terminal output and diagnostics helpers

mod progress;
mod styling;

pub use progress::*;
pub use styling::*;

/// Initialise diagnostics on stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or
/// everything down to debug with `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init()
        .ok();
}
