//! Tracing setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays scriptable. The
//! filter comes from `DECANT_LOG` when set, otherwise from the `--level`
//! flag applied to the decant crates only.

use std::io;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log level options for the CLI.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above
    Info,
    /// Show warnings and above (default)
    Warn,
    /// Show errors only
    Error,
}

impl LogLevel {
    const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(level: LogLevel) {
    let directive = level.as_directive();
    let filter = EnvFilter::try_from_env("DECANT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "decant={directive},decant_core={directive},decant_release={directive},\
             decant_install={directive},decant_smoke={directive}"
        ))
    });

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
