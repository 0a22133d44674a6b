//! Forwarding `tracing` events to a fanlog logger.

use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = Arc::new(fanlog::Logger::new(
        "console(output=stdout) option(level=debug)",
    ));
    fanlog::init_tracing(logger.clone())?;

    tracing::trace!("trace folds into debug");
    tracing::info!("This is an info message");
    tracing::warn!(disk = "/var", used_pct = 91, "disk almost full");
    tracing::error!(error_code = 500, error_type = "database", "Database error occurred");

    logger.shutdown();
    Ok(())
}
