use fanlog::{Logger, Payload, Severity};
use regex::Regex;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn captured(descriptor: &str) -> (Logger, Capture) {
    let logger = Logger::new(descriptor);
    let capture = Capture::default();
    logger.set_console_writer(capture.clone());
    (logger, capture)
}

fn strip_ansi(text: &str) -> String {
    Regex::new(r"\x1b\[[0-9;]*m")
        .unwrap()
        .replace_all(text, "")
        .into_owned()
}

#[test]
fn test_colors_disabled_emits_no_escapes() {
    let (logger, capture) = captured("console(colors=0) option(level=debug)");

    logger.error("e");
    logger.warning("w");
    logger.info("i");
    logger.debug("d");
    logger.info(Payload::structured([("user", "a")]));

    let out = capture.text();
    assert_eq!(out.lines().count(), 5);
    assert!(!out.contains('\x1b'), "ANSI escape in {:?}", out);
}

#[test]
fn test_severity_colors() {
    let (logger, capture) = captured("console(time=0) option(level=debug)");

    logger.error("e");
    logger.warning("w");
    logger.info("i");
    logger.debug("d");

    assert_eq!(
        capture.text(),
        "\x1b[31mERRO \x1b[0me\n\
         \x1b[33mWARN \x1b[0mw\n\
         \x1b[36mINFO \x1b[0mi\n\
         \x1b[32mDBUG \x1b[0md\n"
    );
}

#[test]
fn test_structured_keys_are_highlighted() {
    let (logger, capture) = captured("console()");

    logger.info(Payload::structured([
        ("user", serde_json::json!("a")),
        ("id", serde_json::json!(1)),
    ]));

    let out = capture.text();
    assert!(out.contains("\"\x1b[37muser\x1b[0m\":"), "{:?}", out);
    assert!(out.contains("\"\x1b[37mid\x1b[0m\":"), "{:?}", out);

    let plain = strip_ansi(&out);
    assert_eq!(plain.lines().count(), 1);
    let json = plain[plain.find('{').expect("json start")..].trim_end();
    let value: serde_json::Value = serde_json::from_str(json).expect("valid json");
    assert_eq!(value["user"], "a");
    assert_eq!(value["id"], 1);
}

#[test]
fn test_template_payload_is_not_highlighted() {
    let (logger, capture) = captured("console(time=0, severity=0)");

    logger.info(Payload::template("raw %s").arg(r#"{"k":1}"#));

    assert_eq!(capture.text(), "raw {\"k\":1}\n");
}

#[test]
fn test_macros() {
    let (logger, capture) = captured("console(time=0, colors=0) option(level=debug)");

    fanlog::error!(logger, "plain");
    fanlog::warning!(logger, "user %s has %d items", "bob", 3);
    fanlog::info!(logger, Payload::structured([("k", "v")]));
    fanlog::debug!(logger, "trailing comma %s", "ok",);
    fanlog::log!(logger, Severity::Info, "explicit %s", "severity");

    assert_eq!(
        capture.text(),
        "ERRO plain\n\
         WARN user bob has 3 items\n\
         INFO {\"k\":\"v\"}\n\
         DBUG trailing comma ok\n\
         INFO explicit severity\n"
    );
}

#[test]
fn test_macro_arguments_not_rendered_when_filtered() {
    struct Loud;
    impl std::fmt::Display for Loud {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            panic!("rendered a filtered argument");
        }
    }

    let (logger, capture) = captured("console() option(level=error)");
    fanlog::debug!(logger, "never %s", Loud);
    assert!(capture.text().is_empty());
}

#[test]
fn test_message_is_trimmed() {
    let (logger, capture) = captured("console(time=0, severity=0)");
    logger.info("  padded message \n");
    assert_eq!(capture.text(), "padded message\n");
}

#[test]
fn test_malformed_descriptor_is_a_silent_noop() {
    let (logger, capture) = captured("console(colors=0");
    logger.error("nothing");
    assert!(capture.text().is_empty());
    assert!(!logger.config().console.enabled);
}
