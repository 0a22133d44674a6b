//! Optional process-wide logger.
//!
//! Nothing is installed implicitly: call [`init_default`] once at startup, then reach the
//! logger through [`default_logger`] (or keep the returned reference). Reconfigure it with
//! [`Logger::reload`].

use once_cell::sync::OnceCell;

use crate::{Error, Logger, Result};

static DEFAULT_LOGGER: OnceCell<Logger> = OnceCell::new();

/// Install the process-wide logger built from `descriptor`.
///
/// # Errors
///
/// Returns [`Error::Init`] if a default logger was already installed.
pub fn init_default(descriptor: &str) -> Result<&'static Logger> {
    install_default(Logger::new(descriptor))
}

/// Install an already constructed logger as the process-wide default.
pub fn install_default(logger: Logger) -> Result<&'static Logger> {
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| Error::Init("default logger already initialized".to_string()))?;
    default_logger().ok_or_else(|| Error::Init("default logger unavailable".to_string()))
}

/// The process-wide logger, if one was installed.
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_logger_is_installed_once() {
        let logger = init_default("option(level=warning)").unwrap();
        assert_eq!(logger.level(), Severity::Warning);
        assert!(std::ptr::eq(logger, default_logger().unwrap()));

        assert!(matches!(init_default("console()"), Err(Error::Init(_))));
        assert_eq!(default_logger().unwrap().level(), Severity::Warning);
    }
}
