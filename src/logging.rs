//! Tracing subscriber setup for the mockup CLI and server.
//!
//! All log output goes to stderr so stdout stays reserved for command
//! results (JSON documents, PNG bytes when writing to `-`).

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter directive for the given verbosity.
///
/// `tower_http` request traces are only enabled from `-v` upwards.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "mockup=error";
    }
    match verbose {
        0 => "mockup=info,tower_http=warn",
        1 => "mockup=debug,tower_http=debug",
        _ => "mockup=trace,tower_http=trace",
    }
}

/// Install the global subscriber.
///
/// * `json` - emit JSON lines (robot mode)
/// * `verbose` - 0 = info, 1 = debug, 2+ = trace
/// * `quiet` - errors only
///
/// `RUST_LOG` overrides the computed filter, e.g.
/// `RUST_LOG=mockup::compose=trace`.
///
/// | Mode  | TTY | Output                  |
/// |-------|-----|-------------------------|
/// | JSON  | any | JSON lines              |
/// | Human | yes | Colored full format     |
/// | Human | no  | Compact, no ANSI        |
pub fn init_logging(json: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let registry = tracing_subscriber::registry().with(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else if io::stderr().is_terminal() {
        registry
            .with(
                fmt::layer()
                    .with_target(verbose > 0)
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_target(false)
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
