//! DropCraft Logging
//!
//! Logging setup for the `dropcraft` binary.
//!
//! Every command prints exactly one JSON document on stdout, so log lines
//! always go to stderr. The default level is `warn`; each `-v` raises it.
//! `RUST_LOG` overrides the level entirely.
//!
//! ## Usage
//!
//! ```no_run
//! use dropcraft_logging::{try_init, LogLevel};
//!
//! // `-vv` on the command line
//! try_init(LogLevel::from_verbosity(2)).ok();
//! ```

use tracing_subscriber::EnvFilter;

/// Log level for the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    #[default]
    Warn,
    /// Progress messages
    Info,
    /// Per-wave and per-query detail
    Debug,
    /// Per-row detail
    Trace,
}

impl LogLevel {
    /// Create a log level from a verbosity count
    ///
    /// - `0` → `Warn`
    /// - `1` → `Info`
    /// - `2` → `Debug`
    /// - `3+` → `Trace`
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Initialize logging, returning an error if a subscriber is already set
pub fn try_init(level: LogLevel) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e.to_string())
}

/// Initialize logging for tests (captures output for test framework)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
