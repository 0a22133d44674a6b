//! # Fanlog
//!
//! A process-local logger fanning each event out to up to three sinks under one
//! severity filter.
//!
//! ## Features
//!
//! - Time-templated log files (`app-%Y%m%d.log`) that rotate when the rendered path changes
//! - Console output to stdout or stderr with ANSI colors and highlighted structured keys
//! - Syslog delivery to the local daemon or a remote collector over UDP
//! - Template payloads with printf-style arguments, or structured key/value payloads
//! - A one-line configuration descriptor, a typed builder, or serde-loadable config
//! - Integration with the `tracing` ecosystem
//!
//! Logging never fails: a sink that cannot open its file or reach its collector skips
//! the event and retries on the next one.
//!
//! ## Example
//!
//! ```rust
//! use fanlog::{Logger, Payload};
//!
//! let logger = Logger::new("console(output=stdout, colors=0) option(level=debug)");
//!
//! logger.info("service started");
//! fanlog::warning!(logger, "queue %s is %d%% full", "ingest", 93);
//! logger.debug(Payload::structured([("user", "alice"), ("action", "login")]));
//! ```

pub mod builder;
pub mod config;
pub mod error;
mod global;
pub mod level;
mod logger;
mod macros;
pub mod payload;
mod sink;
pub mod strftime;
pub mod syslog;
pub mod template;
mod writer;

#[cfg(feature = "tracing-integration")]
pub mod tracing_init;

pub use builder::LoggerBuilder;
pub use config::{ConsoleTarget, LoggerConfig, TimeMode};
pub use error::{Error, Result};
pub use global::{default_logger, init_default, install_default};
pub use level::{Facility, Severity};
pub use logger::Logger;
pub use payload::Payload;
pub use sink::SinkStats;

#[cfg(feature = "tracing-integration")]
pub use tracing_init::{FanoutLayer, init_tracing};

/// Create a [`LoggerBuilder`] with every sink disabled.
pub fn builder() -> LoggerBuilder {
    LoggerBuilder::new()
}
