//! The dispatcher: filters events and fans them out to the configured sinks.
//!
//! Every call runs to completion on the calling thread. One mutex guards the
//! configuration, the sink resources and the writes themselves; it is taken once per
//! sink for the duration of a resource check plus a single write, so lines never
//! interleave and at most one caller at a time attempts to open a resource.
//!
//! Each sink reads the configuration under its own lock. A reload landing between two
//! sinks of one event therefore applies to the remaining ones; a write already holding
//! the lock completes against the old configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use time::{OffsetDateTime, UtcOffset};

use crate::config::{ConsoleTarget, LoggerConfig, TimeMode};
use crate::payload::{Message, RESET};
use crate::sink::{Counters, SinkState, SinkStats};
use crate::syslog::SyslogConnection;
use crate::{Payload, Severity, strftime};

type ConsoleWriter = Box<dyn Write + Send>;

struct Inner {
    config: Arc<LoggerConfig>,
    sinks: SinkState,
    console: Option<ConsoleWriter>,
}

/// A logger fanning events out to file, console and syslog sinks.
///
/// Loggers are cheap to share behind an `Arc` or a `&'static` reference (see
/// [`crate::init_default`]).
pub struct Logger {
    level: AtomicU8,
    active: AtomicBool,
    counters: Arc<Counters>,
    inner: Mutex<Inner>,
}

impl Logger {
    /// Create a logger from a descriptor, see [`LoggerConfig::parse`].
    pub fn new(descriptor: &str) -> Self {
        Self::with_config(LoggerConfig::parse(descriptor))
    }

    /// Create a logger from an already built configuration.
    pub fn with_config(config: LoggerConfig) -> Self {
        let config = config.sanitized();
        let counters = Arc::new(Counters::default());

        Self {
            level: AtomicU8::new(config.level.to_u8()),
            active: AtomicBool::new(config.any_sink_enabled()),
            inner: Mutex::new(Inner {
                sinks: SinkState::new(&config.file.path, counters.clone()),
                config: Arc::new(config),
                console: None,
            }),
            counters,
        }
    }

    /// Replace the configuration with one parsed from `descriptor`.
    ///
    /// Open resources are released first; the new sinks open lazily.
    pub fn reload(&self, descriptor: &str) {
        self.reload_config(LoggerConfig::parse(descriptor));
    }

    /// Replace the configuration.
    pub fn reload_config(&self, config: LoggerConfig) {
        let config = config.sanitized();
        let mut inner = self.lock();

        inner.sinks.close();
        inner.sinks = SinkState::new(&config.file.path, self.counters.clone());
        self.level.store(config.level.to_u8(), Ordering::Release);
        self.active
            .store(config.any_sink_enabled(), Ordering::Release);
        inner.config = Arc::new(config);

        tracing::debug!(sinks = %inner.config.to_descriptor(), "logger reloaded");
    }

    /// Close the syslog connection and the log file. Safe to call repeatedly; a later
    /// event reopens what it needs.
    pub fn shutdown(&self) {
        self.lock().sinks.close();
    }

    /// Set the minimum severity by name. Unknown names are ignored.
    pub fn set_level(&self, name: &str) {
        if let Some(severity) = Severity::from_name(name) {
            let mut inner = self.lock();
            self.level.store(severity.to_u8(), Ordering::Release);
            Arc::make_mut(&mut inner.config).level = severity;
        }
    }

    /// Current minimum severity.
    pub fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Acquire))
    }

    /// Whether an event of `severity` would reach any sink.
    pub fn enabled_for(&self, severity: Severity) -> bool {
        severity >= self.level() && self.active.load(Ordering::Acquire)
    }

    /// Current configuration.
    pub fn config(&self) -> Arc<LoggerConfig> {
        self.lock().config.clone()
    }

    /// Path the file sink currently writes to.
    pub fn current_file_path(&self) -> Option<PathBuf> {
        self.lock().sinks.file.path()
    }

    /// Resource counters accumulated over the lifetime of this logger.
    pub fn stats(&self) -> SinkStats {
        self.counters.snapshot()
    }

    /// Send console output to `writer` instead of stdout/stderr. Survives reloads.
    pub fn set_console_writer<W: Write + Send + 'static>(&self, writer: W) {
        self.lock().console = Some(Box::new(writer));
    }

    /// Send console output back to the configured standard stream.
    pub fn clear_console_writer(&self) {
        self.lock().console = None;
    }

    pub fn error(&self, payload: impl Into<Payload>) {
        self.emit(Severity::Error, payload);
    }

    pub fn warning(&self, payload: impl Into<Payload>) {
        self.emit(Severity::Warning, payload);
    }

    pub fn info(&self, payload: impl Into<Payload>) {
        self.emit(Severity::Info, payload);
    }

    pub fn debug(&self, payload: impl Into<Payload>) {
        self.emit(Severity::Debug, payload);
    }

    /// Log an event at the current wall-clock time.
    pub fn emit(&self, severity: Severity, payload: impl Into<Payload>) {
        if !self.enabled_for(severity) {
            return;
        }
        self.dispatch(severity, payload.into(), None);
    }

    /// Log an event as if it happened at `at`.
    pub fn emit_at(&self, severity: Severity, payload: impl Into<Payload>, at: OffsetDateTime) {
        if !self.enabled_for(severity) {
            return;
        }
        self.dispatch(severity, payload.into(), Some(at));
    }

    fn dispatch(&self, severity: Severity, payload: Payload, at: Option<OffsetDateTime>) {
        let message = Message::new(payload);
        let utc = self.lock().config.utc;

        let now = at.unwrap_or_else(|| {
            if utc {
                OffsetDateTime::now_utc()
            } else {
                OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
            }
        });
        let now = if utc { now.to_offset(UtcOffset::UTC) } else { now };

        self.write_syslog(severity, &message, &now);
        self.write_file(severity, &message, &now);
        self.write_console(severity, &message, &now);
    }

    fn write_syslog(&self, severity: Severity, message: &Message, now: &OffsetDateTime) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if !inner.config.syslog.enabled {
            return;
        }

        if inner.sinks.syslog.is_none() {
            match SyslogConnection::connect(&inner.config.syslog) {
                Ok(conn) => {
                    self.counters
                        .syslog_connects
                        .fetch_add(1, Ordering::Relaxed);
                    inner.sinks.syslog = Some(conn);
                }
                Err(e) => {
                    tracing::debug!(remote = %inner.config.syslog.remote, error = %e, "syslog connect failed");
                    return;
                }
            }
        }

        let failed = match &inner.sinks.syslog {
            Some(conn) => conn.send(severity, message.text(), now).err(),
            None => None,
        };
        if let Some(e) = failed {
            tracing::debug!(error = %e, "syslog send failed, reconnecting on next event");
            inner.sinks.syslog = None;
        }
    }

    fn write_file(&self, severity: Severity, message: &Message, now: &OffsetDateTime) {
        let mut inner = self.lock();
        let config = &inner.config.file;
        if !config.enabled {
            return;
        }

        let mut line = time_prefix(config.time, now);
        if config.severity {
            line.push_str(severity.label());
        }
        line.push_str(message.text());
        line.push('\n');

        let written = inner.sinks.file.write_line(now, &line);
        if let Err(e) = written {
            tracing::warn!(path = ?inner.sinks.file.path(), error = %e, "log file write failed");
        }
    }

    fn write_console(&self, severity: Severity, message: &Message, now: &OffsetDateTime) {
        let mut inner = self.lock();
        let config = &inner.config.console;
        if !config.enabled {
            return;
        }

        let mut line = time_prefix(config.time, now);
        if config.severity {
            if config.colors {
                line.push_str(severity.color());
                line.push_str(severity.label());
                line.push_str(RESET);
            } else {
                line.push_str(severity.label());
            }
        }
        if config.colors {
            line.push_str(&message.highlighted());
        } else {
            line.push_str(message.text());
        }
        line.push('\n');

        // Console failures (closed pipe and the like) are dropped.
        let target = config.output;
        let _ = match inner.console.as_mut() {
            Some(writer) => writer.write_all(line.as_bytes()),
            None => match target {
                ConsoleTarget::Stdout => io::stdout().lock().write_all(line.as_bytes()),
                ConsoleTarget::Stderr => io::stderr().lock().write_all(line.as_bytes()),
            },
        };
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking writer must not disable logging for everybody else.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Logger {
    /// A logger with every sink disabled.
    fn default() -> Self {
        Self::with_config(LoggerConfig::new())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("config", &self.config())
            .field("stats", &self.stats())
            .finish()
    }
}

fn time_prefix(mode: TimeMode, now: &OffsetDateTime) -> String {
    match mode {
        TimeMode::None => String::new(),
        TimeMode::Date => strftime::format("%Y-%m-%d %H:%M:%S ", now),
        TimeMode::Timestamp => strftime::format("%s ", now),
    }
}
