use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::template::sprintf;

static QUOTED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*:"#).expect("quoted key pattern"));

/// ANSI sequence used to highlight structured keys on the console.
pub const KEY_COLOR: &str = "\x1b[37m";
/// ANSI reset sequence.
pub const RESET: &str = "\x1b[0m";

/// The body of a log event.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// printf-style template with positional arguments.
    Template { template: String, args: Vec<String> },
    /// Key/value mapping, rendered as single-line JSON.
    Structured(Map<String, Value>),
}

impl Payload {
    /// Start a template payload. Add arguments with [`Payload::arg`].
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// A literal message; `%` in `text` is not interpreted.
    pub fn text(text: impl Display) -> Self {
        Self::template("%s").arg(&text)
    }

    /// Append a positional argument. Has no effect on structured payloads.
    pub fn arg<T: Display + ?Sized>(mut self, value: &T) -> Self {
        if let Self::Template { args, .. } = &mut self {
            args.push(value.to_string());
        }
        self
    }

    /// Build a structured payload from key/value pairs.
    pub fn structured<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Structured(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

impl From<&str> for Payload {
    fn from(template: &str) -> Self {
        Self::template(template)
    }
}

impl From<String> for Payload {
    fn from(template: String) -> Self {
        Self::template(template)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Payload {
    fn from(map: BTreeMap<String, V>) -> Self {
        Self::structured(map)
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Payload {
    fn from(map: HashMap<String, V>) -> Self {
        Self::structured(map)
    }
}

/// A payload normalized to a trimmed template and its arguments.
#[derive(Debug)]
pub(crate) struct Message {
    template: String,
    args: Vec<String>,
    structured: bool,
    text: String,
}

impl Message {
    pub(crate) fn new(payload: Payload) -> Self {
        let (template, args, structured) = match payload {
            Payload::Template { template, args } => (template, args, false),
            Payload::Structured(map) => match serde_json::to_string(&map) {
                Ok(json) => ("%s".to_string(), vec![json], true),
                Err(_) => (String::new(), Vec::new(), true),
            },
        };
        let template = template.trim().to_string();
        let text = sprintf(&template, &args);

        Self {
            template,
            args,
            structured,
            text,
        }
    }

    /// Message with arguments substituted.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Message for a colorized console: keys of a structured payload are highlighted.
    pub(crate) fn highlighted(&self) -> String {
        if !self.structured {
            return self.text.clone();
        }
        let args: Vec<String> = self.args.iter().map(|a| highlight_keys(a)).collect();
        sprintf(&self.template, &args)
    }
}

/// Wrap every `"key"` followed by a colon in [`KEY_COLOR`].
pub fn highlight_keys(text: &str) -> String {
    QUOTED_KEY
        .replace_all(text, format!("\"{}${{1}}{}\":", KEY_COLOR, RESET).as_str())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_message() {
        let msg = Message::new(Payload::template("  user %s id %d \n").arg("a").arg(&7));
        assert_eq!(msg.text(), "user a id 7");
        assert_eq!(msg.highlighted(), "user a id 7");
    }

    #[test]
    fn test_text_payload_keeps_percent() {
        let msg = Message::new(Payload::text("50% done"));
        assert_eq!(msg.text(), "50% done");
    }

    #[test]
    fn test_structured_message_is_compact_json() {
        let payload = Payload::structured([("user", json!("a")), ("id", json!(1))]);
        let msg = Message::new(payload);
        assert_eq!(msg.text(), r#"{"id":1,"user":"a"}"#);
        assert!(!msg.text().contains('\n'));
    }

    #[test]
    fn test_structured_markup_is_not_escaped() {
        let payload = Payload::structured([("html", json!("<b>&</b>"))]);
        let msg = Message::new(payload);
        assert_eq!(msg.text(), r#"{"html":"<b>&</b>"}"#);
    }

    #[test]
    fn test_highlight_keys() {
        assert_eq!(
            highlight_keys(r#"{"user":"a"}"#),
            "{\"\x1b[37muser\x1b[0m\":\"a\"}"
        );
    }

    #[test]
    fn test_highlighted_structured_message() {
        let msg = Message::new(Payload::structured([("user", "a")]));
        assert_eq!(msg.highlighted(), "{\"\x1b[37muser\x1b[0m\":\"a\"}");
        assert_eq!(msg.text(), r#"{"user":"a"}"#);
    }

    #[test]
    fn test_from_maps() {
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), 1);
        assert!(Payload::from(map).is_structured());
        assert!(!Payload::from("plain").is_structured());
    }

    #[test]
    fn test_arg_ignored_on_structured() {
        let payload = Payload::structured([("k", 1)]).arg("x");
        assert_eq!(payload, Payload::structured([("k", 1)]));
    }
}
