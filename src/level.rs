use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Urgency of a log event, ordered `Debug < Info < Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Something unexpected that was handled.
    Warning,
    /// Failure.
    Error,
}

impl Severity {
    /// Parse a severity name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Lower-case name as accepted by the descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Fixed-width label written before the message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERRO ",
            Self::Warning => "WARN ",
            Self::Info => "INFO ",
            Self::Debug => "DBUG ",
        }
    }

    /// ANSI SGR sequence used for the console label.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Info => "\x1b[36m",
            Self::Debug => "\x1b[32m",
        }
    }

    /// Syslog severity code (RFC 5424 table 2).
    pub fn syslog_code(&self) -> u8 {
        match self {
            Self::Error => 3,
            Self::Warning => 4,
            Self::Info => 6,
            Self::Debug => 7,
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warning,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::Error::Config(format!("unknown level: {}", s)))
    }
}

/// Syslog facility attached to delivered messages.
///
/// `Unset` is what an absent or unrecognized `facility=` resolves to; it encodes as
/// numeric facility 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    #[default]
    Unset,
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    /// Parse a facility name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Name as accepted by the descriptor; empty for `Unset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }

    /// Facility code (RFC 5424 table 1).
    pub fn code(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::User => 1,
            Self::Daemon => 3,
            Self::Local0 => 16,
            Self::Local1 => 17,
            Self::Local2 => 18,
            Self::Local3 => 19,
            Self::Local4 => 20,
            Self::Local5 => 21,
            Self::Local6 => 22,
            Self::Local7 => 23,
        }
    }

    /// `<PRI>` value for a message of `severity`.
    pub fn priority(&self, severity: Severity) -> u8 {
        self.code() * 8 + severity.syslog_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_severity_from_name() {
        assert_eq!(Severity::from_name("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::from_name("Warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_name("warn"), None);
        assert!("bogus".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_u8_round() {
        for s in [
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ] {
            assert_eq!(Severity::from_u8(s.to_u8()), s);
        }
    }

    #[test]
    fn test_labels_are_fixed_width() {
        for s in [
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ] {
            assert_eq!(s.label().len(), 5);
        }
    }

    #[test]
    fn test_priority_encoding() {
        assert_eq!(Facility::User.priority(Severity::Error), 11);
        assert_eq!(Facility::Daemon.priority(Severity::Info), 30);
        assert_eq!(Facility::Local7.priority(Severity::Debug), 191);
        assert_eq!(Facility::Unset.priority(Severity::Warning), 4);
    }

    #[test]
    fn test_facility_from_name() {
        assert_eq!(Facility::from_name("LOCAL3"), Some(Facility::Local3));
        assert_eq!(Facility::from_name("kern"), None);
    }
}
