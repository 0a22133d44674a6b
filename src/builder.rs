//! Builder pattern for assembling a logger configuration.
//!
//! This is the typed counterpart of the descriptor string: every method corresponds to
//! one descriptor key.
//!
//! # Example
//!
//! ```rust,no_run
//! use fanlog::{Facility, Severity, TimeMode};
//!
//! let logger = fanlog::builder()
//!     .with_file("/var/log/app/app-%Y%m%d.log")
//!     .with_file_time(TimeMode::Timestamp)
//!     .with_console(true)
//!     .with_syslog_remote("10.0.0.5")
//!     .with_facility(Facility::Local3)
//!     .with_level(Severity::Debug)
//!     .build_logger();
//!
//! logger.info("started");
//! ```

use crate::config::{ConsoleTarget, TimeMode, program_name};
use crate::{Facility, Logger, LoggerConfig, Result, Severity};

/// A builder for [`LoggerConfig`] and [`Logger`].
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a builder with every sink disabled.
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::new(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Start from a descriptor string.
    pub fn from_descriptor(descriptor: &str) -> Self {
        Self::from_config(LoggerConfig::parse(descriptor))
    }

    /// Enable the file sink with a path template.
    pub fn with_file(mut self, path_template: impl Into<String>) -> Self {
        self.config.file.path = path_template.into();
        self.config.file.enabled = true;
        self
    }

    /// Set the time prefix of file lines.
    pub fn with_file_time(mut self, time: TimeMode) -> Self {
        self.config.file.time = time;
        self
    }

    /// Write severity labels to the file.
    pub fn with_file_severity(mut self, severity: bool) -> Self {
        self.config.file.severity = severity;
        self
    }

    /// Enable or disable the console sink.
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Choose stdout or stderr for the console sink.
    pub fn with_console_output(mut self, output: ConsoleTarget) -> Self {
        self.config.console.output = output;
        self
    }

    /// Set the time prefix of console lines.
    pub fn with_console_time(mut self, time: TimeMode) -> Self {
        self.config.console.time = time;
        self
    }

    /// Write severity labels to the console.
    pub fn with_console_severity(mut self, severity: bool) -> Self {
        self.config.console.severity = severity;
        self
    }

    /// Enable or disable ANSI colors on the console.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.config.console.colors = colors;
        self
    }

    /// Enable the syslog sink using the local daemon.
    pub fn with_syslog(mut self) -> Self {
        self.config.syslog.enabled = true;
        self
    }

    /// Enable the syslog sink with a remote UDP collector. Port 514 is assumed when
    /// `remote` does not name one.
    pub fn with_syslog_remote(mut self, remote: &str) -> Self {
        // Reuse the descriptor rules for the default port.
        let parsed = LoggerConfig::parse(&format!("syslog(remote={})", remote));
        self.config.syslog.remote = parsed.syslog.remote;
        self.config.syslog.enabled = true;
        self
    }

    /// Set the syslog application name. Defaults to the program name.
    pub fn with_syslog_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.config.syslog.name = if name.is_empty() {
            program_name()
        } else {
            name
        };
        self
    }

    /// Set the syslog facility.
    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.config.syslog.facility = facility;
        self
    }

    /// Render times in UTC.
    pub fn with_utc(mut self, utc: bool) -> Self {
        self.config.utc = utc;
        self
    }

    /// Set the minimum severity.
    pub fn with_level(mut self, level: Severity) -> Self {
        self.config.level = level;
        self
    }

    /// Get the configuration without creating a logger.
    pub fn build(self) -> LoggerConfig {
        self.config.sanitized()
    }

    /// Create a logger from the configuration.
    pub fn build_logger(self) -> Logger {
        Logger::with_config(self.config)
    }

    /// Install the configuration as the process-wide default logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a default logger is already installed.
    pub fn init(self) -> Result<&'static Logger> {
        crate::install_default(self.build_logger())
    }
}
