//! Loading a logger configuration from TOML.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;

const CONFIG: &str = r#"
[log]
level = "debug"

[log.console]
enabled = true
output = "stdout"
time = "timestamp"

[log.syslog]
enabled = false
remote = "127.0.0.1:514"
facility = "local3"
"#;

#[derive(Deserialize)]
struct Config {
    log: fanlog::LoggerConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root: Config = toml::from_str(CONFIG)?;

    // The same settings as a descriptor string
    let descriptor = root.log.to_descriptor();
    fanlog::config::validate(&descriptor)?;
    println!("descriptor: {}", descriptor);

    let logger = fanlog::Logger::with_config(root.log);
    fanlog::debug!(logger, "This is a debug message (visible because level is debug)");
    fanlog::info!(logger, "This is an info message");
    fanlog::warning!(logger, "This is a warning message");
    fanlog::error!(logger, "This is an error message");

    // Switch to a quieter configuration at runtime
    logger.reload("console(output=stdout, colors=0) option(level=warning)");
    fanlog::info!(logger, "hidden after reload");
    fanlog::warning!(logger, "still visible after reload");

    Ok(())
}
