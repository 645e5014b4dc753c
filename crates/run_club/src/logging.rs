//! Tracing subscriber setup for the `run-club` binary.

use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "RUN_CLUB_LOG_LEVEL";

/// Per-target overrides that keep HTTP internals quiet.
const QUIET_TARGETS: &str = "hyper=warn,hyper_util=warn,reqwest=warn";
const FALLBACK_FILTER: &str = "warn,hyper=warn,hyper_util=warn,reqwest=warn";

/// Filter directive string: `--debug` forces `debug`, otherwise
/// `RUN_CLUB_LOG_LEVEL`, then `RUST_LOG`, then `warn`.
pub fn log_filter<F>(debug: bool, mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let level = if debug {
        "debug".to_string()
    } else {
        get(LOG_LEVEL_ENV)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string())
    };
    format!("{level},{QUIET_TARGETS}")
}

pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global subscriber, writing compact lines to stderr.
pub fn init(debug: bool) {
    let filter = log_filter(debug, |k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(debug)
        .with_env_filter(env_filter(&filter))
        .init();
    tracing::debug!("log filter: {}", filter);
}
