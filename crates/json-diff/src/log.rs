//! Diagnostic logging through an injected collaborator.
//!
//! The diff never writes to a global logger. It proposes a level and a
//! message; the [`DiffLogger`] handed in through
//! [`DiffOptions`](crate::DiffOptions) decides whether to emit it. Messages
//! are passed as [`fmt::Arguments`], so nothing is rendered unless the
//! collaborator writes it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    /// Threshold only: nothing is at or above it.
    Off,
}

/// Receiver of diagnostic messages.
pub trait DiffLogger: Send + Sync {
    /// Cheap pre-check; `log` is only called when this returns true.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, level: LogLevel, message: fmt::Arguments<'_>);
}

/// Discards everything. The default collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DiffLogger for NoopLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _message: fmt::Arguments<'_>) {}
}

/// Forwards messages to `tracing` events with target `json_diff`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiffLogger for TracingLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: "json_diff", tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: "json_diff", tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: "json_diff", tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: "json_diff", tracing::Level::WARN),
            LogLevel::Error => tracing::enabled!(target: "json_diff", tracing::Level::ERROR),
            LogLevel::Off => false,
        }
    }

    fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "json_diff", "{}", message),
            LogLevel::Debug => tracing::debug!(target: "json_diff", "{}", message),
            LogLevel::Info => tracing::info!(target: "json_diff", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "json_diff", "{}", message),
            LogLevel::Error => tracing::error!(target: "json_diff", "{}", message),
            LogLevel::Off => {}
        }
    }
}

/// A collaborator plus the configured threshold.
#[derive(Clone)]
pub(crate) struct Logger {
    sink: Arc<dyn DiffLogger>,
    threshold: LogLevel,
}

impl Logger {
    pub(crate) fn new(sink: Arc<dyn DiffLogger>, threshold: LogLevel) -> Self {
        Logger { sink, threshold }
    }

    pub(crate) fn sink(&self) -> &Arc<dyn DiffLogger> {
        &self.sink
    }

    pub(crate) fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub(crate) fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.threshold && self.sink.enabled(level)
    }

    pub(crate) fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.sink.log(level, message);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(Arc::new(NoopLogger), LogLevel::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

macro_rules! log_at {
    ($logger:expr, $level:ident, $($arg:tt)+) => {
        $logger.log($crate::log::LogLevel::$level, format_args!($($arg)+))
    };
}

pub(crate) use log_at;
