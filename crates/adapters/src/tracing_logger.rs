//! Logger port backed by `tracing`.

use serde_json::Value;
use testplan_ports::{LogEvent, LogFields, LogLevel, LoggerPort};

/// Forwards port events to the installed `tracing` subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a logger with no base fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = self.base_fields.clone();
        fields.extend(event.fields.unwrap_or_default());
        let fields = render_fields(&fields);
        let error = event.error.as_ref().map(Value::to_string).unwrap_or_default();
        let name = &*event.event;
        let message = &*event.message;

        match event.level {
            LogLevel::Debug => tracing::debug!(event = name, fields = %fields, error = %error, "{message}"),
            LogLevel::Info => tracing::info!(event = name, fields = %fields, error = %error, "{message}"),
            LogLevel::Warn => tracing::warn!(event = name, fields = %fields, error = %error, "{message}"),
            LogLevel::Error => tracing::error!(event = name, fields = %fields, error = %error, "{message}"),
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            base_fields: merged,
        })
    }
}

fn render_fields(fields: &LogFields) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
