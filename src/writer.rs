use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use time::{Duration, OffsetDateTime};

use crate::sink::Counters;
use crate::strftime;

/// Minimum interval between two evaluations of the path template.
const CHECK_INTERVAL: Duration = Duration::SECOND;

/// A log file whose path is derived from a time template.
///
/// The template is re-rendered at most once per [`CHECK_INTERVAL`] (and whenever no file
/// is open). When the rendered path changes the current file is closed; the next write
/// opens the new one. Callers serialize access through the logger mutex.
#[derive(Debug)]
pub struct RotatingFile {
    /// Path template, e.g. `/var/log/app-%Y%m%d.log`.
    template: String,
    /// Currently open file.
    file: Option<File>,
    /// Path the template rendered to at the last check.
    path: String,
    /// Instant of the last template evaluation.
    last_check: Option<OffsetDateTime>,
    counters: Arc<Counters>,
}

impl RotatingFile {
    pub(crate) fn new(template: &str, counters: Arc<Counters>) -> Self {
        Self {
            template: template.to_string(),
            file: None,
            path: String::new(),
            last_check: None,
            counters,
        }
    }

    /// Path of the current file, once the template has been rendered.
    pub fn path(&self) -> Option<PathBuf> {
        if self.path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.path))
        }
    }

    /// Write one complete line, rotating and opening the file as needed.
    pub fn write_line(&mut self, now: &OffsetDateTime, line: &str) -> io::Result<()> {
        if self.check_due(now) {
            self.last_check = Some(*now);
            self.rotate(now);
        }

        if self.file.is_none() {
            self.file = Some(self.open()?);
            self.counters.file_opens.fetch_add(1, Ordering::Relaxed);
        }

        match self.file.as_mut() {
            Some(file) => file.write_all(line.as_bytes()),
            None => Err(io::Error::other("log file is not open")),
        }
    }

    /// Close the current file, if any.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            self.counters.file_closes.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn check_due(&self, now: &OffsetDateTime) -> bool {
        match self.last_check {
            None => true,
            Some(_) if self.file.is_none() => true,
            // Time stepping back (clock change, replayed events) forces a check.
            Some(last) => *now < last || *now - last >= CHECK_INTERVAL,
        }
    }

    /// Re-render the template and drop the open file when the path changed.
    fn rotate(&mut self, now: &OffsetDateTime) {
        let path = strftime::format(&self.template, now);
        if path != self.path {
            if self.file.is_some() {
                tracing::debug!(from = %self.path, to = %path, "rotating log file");
            }
            self.close();
            self.path = path;
        }
    }

    fn open(&self) -> io::Result<File> {
        let path = Path::new(&self.path);

        // Ensure parent directory exists (create if necessary).
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dirs(parent)?;
        }

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options.open(path)
    }
}

fn create_dirs(dir: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}
