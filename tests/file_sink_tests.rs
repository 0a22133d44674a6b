use fanlog::{Logger, Payload, Severity};
use std::path::Path;
use time::macros::datetime;

fn descriptor(dir: &Path, template: &str, extra: &str) -> String {
    format!(
        "file(path={}) option(utc=1) {}",
        dir.join(template).display(),
        extra
    )
}

#[test]
fn test_file_line_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "app.log", ""));

    logger.emit_at(
        Severity::Info,
        Payload::template("hello %s").arg("world"),
        datetime!(2024-03-05 08:00:00 UTC),
    );
    logger.emit_at(
        Severity::Error,
        "failed",
        datetime!(2024-03-05 08:00:02 UTC),
    );

    let content = std::fs::read_to_string(dir.path().join("app.log")).expect("read log");
    assert_eq!(
        content,
        "2024-03-05 08:00:00 INFO hello world\n2024-03-05 08:00:02 ERRO failed\n"
    );
}

#[test]
fn test_file_timestamp_without_severity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let logger = Logger::new(&format!(
        "file(path={}, time=stamp, severity=0) option(utc=1)",
        path.display()
    ));

    logger.emit_at(Severity::Warning, "tick", datetime!(2024-03-05 08:00:00 UTC));

    let content = std::fs::read_to_string(&path).expect("read log");
    assert_eq!(content, "1709625600 tick\n");
}

#[test]
fn test_file_never_contains_ansi() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "app.log", "console()"));
    logger.set_console_writer(std::io::sink());

    logger.error(Payload::structured([("user", "a")]));

    let content = std::fs::read_to_string(dir.path().join("app.log")).expect("read log");
    assert!(content.contains(r#"ERRO {"user":"a"}"#));
    assert!(!content.contains('\x1b'), "ANSI escape found in log file");
}

#[test]
fn test_same_day_reuses_handle_next_day_rotates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "x-%Y%m%d.log", ""));

    logger.emit_at(Severity::Info, "first", datetime!(2024-03-05 08:00:00 UTC));
    logger.emit_at(Severity::Info, "second", datetime!(2024-03-05 17:30:00 UTC));

    let stats = logger.stats();
    assert_eq!(stats.file_opens, 1);
    assert_eq!(stats.file_closes, 0);
    assert_eq!(
        logger.current_file_path(),
        Some(dir.path().join("x-20240305.log"))
    );

    logger.emit_at(Severity::Info, "third", datetime!(2024-03-06 00:00:05 UTC));

    let stats = logger.stats();
    assert_eq!(stats.file_opens, 2);
    assert_eq!(stats.file_closes, 1);
    assert_eq!(
        logger.current_file_path(),
        Some(dir.path().join("x-20240306.log"))
    );

    let day1 = std::fs::read_to_string(dir.path().join("x-20240305.log")).expect("day 1");
    let day2 = std::fs::read_to_string(dir.path().join("x-20240306.log")).expect("day 2");
    assert_eq!(day1.lines().count(), 2);
    assert!(day2.ends_with("INFO third\n"));
}

#[test]
fn test_replayed_older_event_goes_to_its_own_day() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "x-%Y%m%d.log", "file(time=0)"));

    logger.emit_at(Severity::Info, "day6", datetime!(2024-03-06 08:00:00 UTC));
    logger.emit_at(Severity::Info, "day5", datetime!(2024-03-05 08:00:00 UTC));

    let day5 = std::fs::read_to_string(dir.path().join("x-20240305.log")).expect("day 5");
    let day6 = std::fs::read_to_string(dir.path().join("x-20240306.log")).expect("day 6");
    assert_eq!(day5, "INFO day5\n");
    assert_eq!(day6, "INFO day6\n");
    assert_eq!(logger.stats().file_closes, 1);
}

#[test]
fn test_filtered_severity_performs_no_io() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "app.log", "option(level=error)"));

    logger.warning("ignored");
    logger.info("ignored");
    logger.debug("ignored");

    assert!(!dir.path().join("app.log").exists());
    assert_eq!(logger.stats().file_opens, 0);
    assert_eq!(logger.current_file_path(), None);
}

#[test]
fn test_creates_nested_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "%Y/%m/app.log", ""));

    logger.emit_at(Severity::Info, "nested", datetime!(2024-03-05 08:00:00 UTC));

    assert!(dir.path().join("2024/03/app.log").exists());
}

#[test]
fn test_unopenable_file_is_silent_and_retried() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let logger = Logger::new(&descriptor(&blocker, "app.log", ""));

    logger.emit_at(Severity::Error, "lost", datetime!(2024-03-05 08:00:00 UTC));
    assert_eq!(logger.stats().file_opens, 0);

    std::fs::remove_file(&blocker).expect("remove blocker");
    logger.emit_at(Severity::Error, "kept", datetime!(2024-03-05 08:00:00 UTC));

    let content = std::fs::read_to_string(blocker.join("app.log")).expect("read log");
    assert_eq!(content, "2024-03-05 08:00:00 ERRO kept\n");
}

#[test]
fn test_reload_disabling_file_closes_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "app.log", ""));

    logger.info("open the file");
    assert_eq!(logger.stats().file_opens, 1);

    logger.reload("console()");
    assert_eq!(logger.stats().file_closes, 1);

    logger.shutdown();
    logger.reload("");
    assert_eq!(logger.stats().file_closes, 1);
    assert!(!logger.config().file.enabled);
}

#[test]
fn test_shutdown_then_log_reopens() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "app.log", "file(time=0)"));

    logger.info("one");
    logger.shutdown();
    logger.shutdown();
    logger.info("two");

    let stats = logger.stats();
    assert_eq!(stats.file_opens, 2);
    assert_eq!(stats.file_closes, 1);
    let content = std::fs::read_to_string(dir.path().join("app.log")).expect("read log");
    assert_eq!(content, "INFO one\nINFO two\n");
}

#[test]
fn test_reload_switches_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&descriptor(dir.path(), "a.log", "file(time=0)"));
    logger.info("to a");

    logger.reload(&descriptor(dir.path(), "b.log", "file(time=0)"));
    logger.info("to b");

    assert_eq!(
        std::fs::read_to_string(dir.path().join("a.log")).expect("a"),
        "INFO to a\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("b.log")).expect("b"),
        "INFO to b\n"
    );
}
