//! `tracing-subscriber` installation.
//!
//! Filter precedence: `HEALTHHIVE_LOG`, then `RUST_LOG`, then the level
//! implied by `-v` (warn, info, debug, trace). Output goes to stderr so
//! JSON reports on stdout stay clean.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "HEALTHHIVE_LOG";

/// Default directive for a `-v` count.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    let from_env = std::env::var(LOG_ENV_VAR)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok());

    from_env.unwrap_or_else(|| EnvFilter::new(filter_directive(verbosity)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();

    if result.is_err() {
        ::tracing::debug!("Tracing subscriber already installed");
    }
}
