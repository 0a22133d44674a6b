//! Sink configuration and the descriptor mini-language.
//!
//! A descriptor is a free-form string containing directives such as
//!
//! ```text
//! file(path=/var/log/app-%Y%m%d.log, time=stamp) console(output=stdout, colors=0)
//! syslog(remote=10.0.0.1, facility=local3) option(utc=1, level=debug)
//! ```
//!
//! Directives are located by pattern matching. Text that is not a recognized directive or
//! key is ignored, so [`LoggerConfig::parse`] never fails. Use [`validate`] to reject
//! descriptors with unknown keys, levels or facilities up front.

use std::fmt::Write;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Facility, Result, Severity};

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(file|console|syslog|option)\s*\(([^)]*)\)").expect("directive pattern")
});

static OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:=,\s]+)\s*[:=]\s*([^,\s]+)").expect("option pattern"));

static PORT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r":\d+$").expect("port pattern"));

/// Port appended to a remote syslog address that does not name one.
pub const DEFAULT_SYSLOG_PORT: u16 = 514;

/// How a sink prefixes each line with the event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// No time prefix.
    None,
    /// `YYYY-MM-DD HH:MM:SS` prefix.
    #[default]
    Date,
    /// Unix epoch seconds prefix.
    Timestamp,
}

impl TimeMode {
    fn from_value(value: &str) -> Self {
        match value {
            "stamp" | "timestamp" => Self::Timestamp,
            v if is_truthy(v) => Self::Date,
            _ => Self::None,
        }
    }

    fn as_value(&self) -> &'static str {
        match self {
            Self::None => "0",
            Self::Date => "1",
            Self::Timestamp => "stamp",
        }
    }
}

/// Standard stream used by the console sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleTarget {
    Stdout,
    #[default]
    Stderr,
}

/// Configuration for the rotating file sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Enable the sink. Ignored while `path` is empty.
    #[serde(default)]
    pub enabled: bool,
    /// Path template, rendered through [`crate::strftime::format`] on rotation checks.
    #[serde(default)]
    pub path: String,
    /// Time prefix style.
    #[serde(default)]
    pub time: TimeMode,
    /// Write the severity label.
    #[serde(default = "default_true")]
    pub severity: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: String::new(),
            time: TimeMode::Date,
            severity: true,
        }
    }
}

/// Configuration for the console sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSinkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub output: ConsoleTarget,
    #[serde(default)]
    pub time: TimeMode,
    #[serde(default = "default_true")]
    pub severity: bool,
    /// Colorize severity labels and structured keys with ANSI escapes.
    #[serde(default = "default_true")]
    pub colors: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output: ConsoleTarget::Stderr,
            time: TimeMode::Date,
            severity: true,
            colors: true,
        }
    }
}

/// Configuration for the syslog sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogSinkConfig {
    #[serde(default)]
    pub enabled: bool,
    /// `host:port` of a remote collector reached over UDP; empty means the local daemon.
    #[serde(default)]
    pub remote: String,
    /// Application name (tag).
    #[serde(default = "program_name")]
    pub name: String,
    #[serde(default)]
    pub facility: Facility,
}

impl Default for SyslogSinkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            remote: String::new(),
            name: program_name(),
            facility: Facility::Unset,
        }
    }
}

/// Complete logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub file: FileSinkConfig,
    pub console: ConsoleSinkConfig,
    pub syslog: SyslogSinkConfig,
    /// Render times in UTC instead of the local offset.
    pub utc: bool,
    /// Minimum severity that reaches the sinks.
    pub level: Severity,
}

impl LoggerConfig {
    /// Create a configuration with every sink disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a descriptor. Unrecognized text is ignored.
    pub fn parse(descriptor: &str) -> Self {
        let mut config = Self::new();

        for directive in DIRECTIVE.captures_iter(descriptor) {
            let options = OPTION.captures_iter(&directive[2]).map(|option| {
                (
                    option[1].to_ascii_lowercase(),
                    option.get(2).map_or("", |m| m.as_str()),
                )
            });

            match directive[1].to_ascii_lowercase().as_str() {
                "file" => {
                    config.file.enabled = true;
                    for (key, value) in options {
                        let lower = value.to_ascii_lowercase();
                        match key.as_str() {
                            "path" => config.file.path = value.to_string(),
                            "time" => config.file.time = TimeMode::from_value(&lower),
                            "severity" => config.file.severity = is_truthy(&lower),
                            _ => {}
                        }
                    }
                }
                "console" => {
                    config.console.enabled = true;
                    for (key, value) in options {
                        let lower = value.to_ascii_lowercase();
                        match key.as_str() {
                            "output" => {
                                config.console.output = if lower == "stdout" {
                                    ConsoleTarget::Stdout
                                } else {
                                    ConsoleTarget::Stderr
                                };
                            }
                            "time" => config.console.time = TimeMode::from_value(&lower),
                            "severity" => config.console.severity = is_truthy(&lower),
                            "colors" => config.console.colors = is_truthy(&lower),
                            _ => {}
                        }
                    }
                }
                "syslog" => {
                    config.syslog.enabled = true;
                    for (key, value) in options {
                        match key.as_str() {
                            "remote" => config.syslog.remote = with_default_port(value),
                            "name" => config.syslog.name = value.to_string(),
                            "facility" => {
                                config.syslog.facility =
                                    Facility::from_name(value).unwrap_or_default();
                            }
                            _ => {}
                        }
                    }
                }
                "option" => {
                    for (key, value) in options {
                        let lower = value.to_ascii_lowercase();
                        match key.as_str() {
                            "utc" => config.utc = is_truthy(&lower),
                            "level" => {
                                config.level = Severity::from_name(&lower).unwrap_or(Severity::Error);
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        config.sanitized()
    }

    /// Enforce the sink invariants: a file sink without a path is disabled.
    pub fn sanitized(mut self) -> Self {
        if self.file.path.is_empty() {
            self.file.enabled = false;
        }
        self
    }

    /// Whether any sink would produce output.
    pub fn any_sink_enabled(&self) -> bool {
        self.file.enabled || self.console.enabled || self.syslog.enabled
    }

    /// Render this configuration back into a descriptor accepted by [`Self::parse`].
    ///
    /// Descriptor values cannot be quoted: a path, name or remote containing whitespace,
    /// `,` or `)` does not survive the round trip. [`validate`] rejects such output.
    pub fn to_descriptor(&self) -> String {
        let mut out = String::new();

        if self.file.enabled {
            let _ = write!(
                out,
                "file(path={}, time={}, severity={}) ",
                self.file.path,
                self.file.time.as_value(),
                bool_value(self.file.severity)
            );
        }
        if self.console.enabled {
            let output = match self.console.output {
                ConsoleTarget::Stdout => "stdout",
                ConsoleTarget::Stderr => "stderr",
            };
            let _ = write!(
                out,
                "console(output={}, time={}, severity={}, colors={}) ",
                output,
                self.console.time.as_value(),
                bool_value(self.console.severity),
                bool_value(self.console.colors)
            );
        }
        if self.syslog.enabled {
            out.push_str("syslog(");
            if !self.syslog.remote.is_empty() {
                let _ = write!(out, "remote={}, ", self.syslog.remote);
            }
            if self.syslog.facility != Facility::Unset {
                let _ = write!(out, "facility={}, ", self.syslog.facility.as_str());
            }
            let _ = write!(out, "name={}) ", self.syslog.name);
        }
        let _ = write!(
            out,
            "option(utc={}, level={})",
            bool_value(self.utc),
            self.level
        );

        out
    }
}

impl FromStr for LoggerConfig {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Strictly check a descriptor.
///
/// [`LoggerConfig::parse`] silently ignores whatever it does not understand; this reports
/// the first problem instead: stray text, option text that is not a `key=value` pair,
/// unknown directive keys, unknown level or facility names and file directives without
/// a path.
pub fn validate(descriptor: &str) -> Result<()> {
    let stray = DIRECTIVE.replace_all(descriptor, "");
    if !stray.trim().is_empty() {
        return Err(Error::Config(format!(
            "unrecognized text: {}",
            stray.trim()
        )));
    }

    for directive in DIRECTIVE.captures_iter(descriptor) {
        let name = directive[1].to_ascii_lowercase();
        let known: &[&str] = match name.as_str() {
            "file" => &["path", "time", "severity"],
            "console" => &["output", "time", "severity", "colors"],
            "syslog" => &["remote", "name", "facility"],
            _ => &["utc", "level"],
        };

        let leftover = OPTION.replace_all(&directive[2], "");
        if leftover.chars().any(|c| c != ',' && !c.is_whitespace()) {
            return Err(Error::Config(format!(
                "malformed options in {}(): {}",
                name,
                &directive[2]
            )));
        }

        let mut has_path = false;
        for option in OPTION.captures_iter(&directive[2]) {
            let key = option[1].to_ascii_lowercase();
            let value = &option[2];
            if !known.contains(&key.as_str()) {
                return Err(Error::Config(format!("unknown key `{}` in {}()", key, name)));
            }
            match key.as_str() {
                "path" => has_path = true,
                "level" => {
                    value.parse::<Severity>()?;
                }
                "facility" if Facility::from_name(value).is_none() => {
                    return Err(Error::Config(format!("unknown facility: {}", value)));
                }
                _ => {}
            }
        }

        if name == "file" && !has_path {
            return Err(Error::Config("file() requires a path".to_string()));
        }
    }

    Ok(())
}

/// `1`, `true`, `on` and `yes` are true; everything else is false.
fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "on" | "yes")
}

fn bool_value(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn default_true() -> bool {
    true
}

fn with_default_port(remote: &str) -> String {
    if PORT_SUFFIX.is_match(remote) {
        remote.to_string()
    } else {
        format!("{}:{}", remote, DEFAULT_SYSLOG_PORT)
    }
}

/// Base name of the running program, used as the default syslog tag.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(std::path::PathBuf::from)
        .or_else(|| std::env::current_exe().ok())
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
