//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout carries only the per-image report lines.
//! `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
//! `-v`.

use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Per-image spans report their timing on close at debug level only.
pub fn span_events(is_debug: bool) -> FmtSpan {
    if is_debug { FmtSpan::CLOSE } else { FmtSpan::NONE }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let is_debug = verbose || env_filter.to_string().contains("debug");

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events(is_debug));

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_picks_level() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn span_close_events_only_when_debugging() {
        assert_eq!(span_events(true), FmtSpan::CLOSE);
        assert_eq!(span_events(false), FmtSpan::NONE);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::info!("logger initialized");
    }
}
