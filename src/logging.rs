//! Logging setup on top of `tracing`.
//!
//! Level selection:
//! 1. `--debug`: debug for this crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. default: warnings, so the progress bar stays readable

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEBUG_FILTER: &str = "godocgen=debug";
const QUIET_FILTER: &str = "godocgen=error";
const DEFAULT_FILTER: &str = "godocgen=warn";

/// Build the filter for the given flags.
pub fn build_filter(debug: bool, quiet: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for `--json` and `inspect`.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logger(debug: bool, quiet: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(should_use_colors())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_filter(debug, quiet))
        .with(fmt_layer)
        .try_init();
}

/// Colors on stderr unless `NO_COLOR` is set or stderr is not a terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stderr().features().colors_supported()
}
