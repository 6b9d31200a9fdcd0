#![forbid(unsafe_code)]

//! Tracing subscriber bootstrap for hovertip binaries.
//!
//! Libraries only emit through `tracing`; binaries call [`init_logging`]
//! once at startup. `HOVERTIP_LOG` overrides the verbosity-derived filter
//! with any `EnvFilter` directive (for example `hovertip.tooltip=trace`).

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for filter directives.
pub const LOG_ENV: &str = "HOVERTIP_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Pretty,
    /// Newline-delimited JSON on stderr.
    Json,
}

/// Map a `-v` count to a tracing directive.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Uses `try_init()`, so a second call (tests, embedding) is a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    match format {
        LogFormat::Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(verbosity > 0)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates_at_trace() {
        assert_eq!(verbosity_to_directive(0), "info");
        assert_eq!(verbosity_to_directive(1), "debug");
        assert_eq!(verbosity_to_directive(2), "trace");
        assert_eq!(verbosity_to_directive(9), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LogFormat::Pretty, 0);
        init_logging(LogFormat::Json, 2);
    }
}
