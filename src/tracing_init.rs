//! Bridge from the `tracing` ecosystem into a [`Logger`].
//!
//! [`FanoutLayer`] forwards every `tracing` event to the logger's sinks. Events whose
//! only field is `message` become plain text payloads; events carrying other fields are
//! logged as structured payloads (with `message` kept as a key).

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::{Error, Logger, Payload, Result, Severity};

/// Events from this crate are never forwarded, so the logger cannot feed itself.
const OWN_TARGET: &str = env!("CARGO_PKG_NAME");

/// A `tracing_subscriber` layer writing events through a [`Logger`].
#[derive(Debug, Clone)]
pub struct FanoutLayer {
    logger: Arc<Logger>,
}

impl FanoutLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

/// Map a `tracing` level onto a severity; TRACE folds into debug.
pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warning,
        Level::INFO => Severity::Info,
        _ => Severity::Debug,
    }
}

impl<S: Subscriber> Layer<S> for FanoutLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }
        let severity = severity_for(metadata.level());
        if !self.logger.enabled_for(severity) {
            return;
        }

        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        self.logger.emit(severity, fields.into_payload());
    }
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldCollector {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }

    fn into_payload(mut self) -> Payload {
        if self.fields.is_empty() {
            return Payload::text(self.message.unwrap_or_default());
        }
        if let Some(message) = self.message {
            self.fields.insert("message".to_string(), Value::String(message));
        }
        Payload::Structured(self.fields)
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }
}

/// Install a global `tracing` subscriber that forwards events to `logger`.
///
/// `RUST_LOG` takes precedence; otherwise events are filtered at the logger's level.
///
/// # Errors
///
/// Returns [`Error::Init`] if the filter is invalid or a global subscriber is already
/// installed.
pub fn init_tracing(logger: Arc<Logger>) -> Result<()> {
    let spec = effective_filter_spec(logger.level());
    let filter = EnvFilter::try_new(&spec).map_err(|e| Error::Init(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(FanoutLayer::new(logger))
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Determine the `tracing` filter directive for a logger level.
fn effective_filter_spec(level: Severity) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    match level {
        Severity::Error => "error",
        Severity::Warning => "warn",
        Severity::Info => "info",
        Severity::Debug => "trace",
    }
    .to_string()
}
