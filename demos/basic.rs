//! Basic console logging example.
//!
//! Run with:
//! ```bash
//! cargo run --example basic
//! ```

use fanlog::Payload;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install a process-wide logger from a descriptor
    let logger = fanlog::init_default("console(output=stdout) option(level=debug)")?;

    fanlog::debug!(logger, "starting with pid %d", std::process::id());
    fanlog::info!(logger, "listening on %s:%d", "0.0.0.0", 8080);
    fanlog::warning!(logger, "cache at %d%% capacity", 93);
    fanlog::error!(logger, "upstream %q unreachable", "billing");

    // Structured payloads are written as single-line JSON
    logger.info(Payload::structured([
        ("user", serde_json::json!("bob")),
        ("action", serde_json::json!("logout")),
        ("duration_ms", serde_json::json!(1234)),
    ]));

    // Anywhere else in the program
    if let Some(logger) = fanlog::default_logger() {
        logger.info("done");
    }

    Ok(())
}
