use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::syslog::SyslogConnection;
use crate::writer::RotatingFile;

/// Lifetime resource counters of a logger, kept across reloads.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) file_opens: AtomicU64,
    pub(crate) file_closes: AtomicU64,
    pub(crate) syslog_connects: AtomicU64,
}

impl Counters {
    pub(crate) fn snapshot(&self) -> SinkStats {
        SinkStats {
            file_opens: self.file_opens.load(Ordering::Relaxed),
            file_closes: self.file_closes.load(Ordering::Relaxed),
            syslog_connects: self.syslog_connects.load(Ordering::Relaxed),
        }
    }
}

/// How often a logger opened and released its resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkStats {
    pub file_opens: u64,
    pub file_closes: u64,
    pub syslog_connects: u64,
}

/// Mutable resources of one logger configuration.
#[derive(Debug)]
pub(crate) struct SinkState {
    pub(crate) file: RotatingFile,
    pub(crate) syslog: Option<SyslogConnection>,
}

impl SinkState {
    pub(crate) fn new(path_template: &str, counters: Arc<Counters>) -> Self {
        Self {
            file: RotatingFile::new(path_template, counters),
            syslog: None,
        }
    }

    /// Release the syslog connection and the file handle.
    pub(crate) fn close(&mut self) {
        self.syslog = None;
        self.file.close();
    }
}
