/// Log through a [`Logger`](crate::Logger) at an explicit severity.
///
/// With a single payload expression the value is converted with `Into<Payload>`, so a
/// string is used as a template and a map is logged as structured data. Additional
/// arguments are substituted positionally into the template. Arguments are only
/// rendered when the severity passes the logger's filter.
///
/// ```rust
/// use fanlog::{Logger, Severity};
///
/// let logger = Logger::new("console(output=stdout)");
/// fanlog::log!(logger, Severity::Info, "listening on port %d", 8080);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $payload:expr $(,)?) => {
        $logger.emit($severity, $payload)
    };
    ($logger:expr, $severity:expr, $template:expr, $($arg:expr),+ $(,)?) => {{
        let severity = $severity;
        let logger = &$logger;
        if logger.enabled_for(severity) {
            logger.emit(severity, $crate::Payload::template($template)$(.arg(&$arg))+);
        }
    }};
}

/// Log at [`Severity::Error`](crate::Severity::Error). See [`log!`].
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($rest)+)
    };
}

/// Log at [`Severity::Warning`](crate::Severity::Warning). See [`log!`].
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($rest)+)
    };
}

/// Log at [`Severity::Info`](crate::Severity::Info). See [`log!`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($rest)+)
    };
}

/// Log at [`Severity::Debug`](crate::Severity::Debug). See [`log!`].
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($rest)+)
    };
}
