//! # Scoped Logger
//!
//! The adapter's view of the host logger. Every line carries the
//! `component=boards` field; the shared host logger is never mutated, so other
//! products using the same logger are unaffected.
//!
//! Lines are mirrored to `tracing` so adapter logs show up even when the host
//! supplied no logger (e.g. a disabled product built from a minimal registry).

use host_api::{LogField, LogLevel, LogService};
use std::fmt;
use std::sync::Arc;

/// Field attached to every adapter log line.
pub const COMPONENT_FIELD: &str = "component";

/// Logger bound to the boards component.
#[derive(Clone)]
pub struct ScopedLogger {
    inner: Option<Arc<dyn LogService>>,
    fields: Vec<LogField>,
}

impl ScopedLogger {
    /// Wrap the host logger. Does not call into it.
    pub fn new(inner: Option<Arc<dyn LogService>>, component: &str) -> Self {
        Self {
            inner,
            fields: vec![LogField::new(COMPONENT_FIELD, component)],
        }
    }

    /// Whether a host logger is attached.
    pub fn has_host_logger(&self) -> bool {
        self.inner.is_some()
    }

    /// Fields attached to every line.
    pub fn fields(&self) -> &[LogField] {
        &self.fields
    }

    /// Copy of this logger with one more field.
    #[must_use]
    pub fn with_field(&self, key: &str, value: &str) -> Self {
        let mut scoped = self.clone();
        scoped.fields.push(LogField::new(key, value));
        scoped
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, &[]);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, &[]);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, &[]);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, &[]);
    }

    /// Log with extra per-line fields.
    pub fn log(&self, level: LogLevel, message: &str, extra: &[LogField]) {
        let component = self.fields.first().map_or("", |f| f.value.as_str());
        match level {
            LogLevel::Debug => tracing::debug!(component, fields = ?extra, "{}", message),
            LogLevel::Info => tracing::info!(component, fields = ?extra, "{}", message),
            LogLevel::Warn => tracing::warn!(component, fields = ?extra, "{}", message),
            LogLevel::Error => tracing::error!(component, fields = ?extra, "{}", message),
        }

        if let Some(inner) = &self.inner {
            if extra.is_empty() {
                inner.log(level, message, &self.fields);
            } else {
                let mut fields = self.fields.clone();
                fields.extend_from_slice(extra);
                inner.log(level, message, &fields);
            }
        }
    }
}

impl fmt::Debug for ScopedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLogger")
            .field("host_logger", &self.inner.is_some())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Log build and version details once the boards app exists.
pub fn log_server_info(logger: &ScopedLogger) {
    logger.log(
        LogLevel::Info,
        "Server info",
        &[
            LogField::new("version", env!("CARGO_PKG_VERSION")),
            LogField::new("package", env!("CARGO_PKG_NAME")),
            LogField::new("build", if cfg!(debug_assertions) { "debug" } else { "release" }),
        ],
    );
}
