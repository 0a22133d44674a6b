//! Time based file rotation.
//!
//! The file path is a strftime template; a new file is started whenever the rendered
//! path changes. This example rotates every second.

use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let template = temp_dir.path().join("%Y%m%d").join("app-%H%M%S.log");

    let logger = fanlog::builder()
        .with_file(template.to_string_lossy())
        .with_console(true)
        .with_colors(false)
        .build_logger();

    for i in 0..12 {
        fanlog::info!(logger, "log message number %d", i);
        if i == 5 {
            println!("writing to {:?}", logger.current_file_path());
        }
        thread::sleep(Duration::from_millis(250));
    }
    logger.shutdown();

    let stats = logger.stats();
    println!(
        "opened {} files, closed {}, last file {:?}",
        stats.file_opens,
        stats.file_closes,
        logger.current_file_path()
    );

    Ok(())
}
