//! Run log with console + file fan-out
//!
//! Every status line of a run is printed to the console and mirrored to a
//! persistent log file. The log is an explicit value passed by reference,
//! not ambient global state.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::warn;

use crate::error::Result;

/// Fan-out sink for run status lines
pub struct RunLog {
    path: PathBuf,
    file: BufWriter<File>,
    /// Suppresses console echo (used by tests)
    quiet: bool,
}

impl RunLog {
    /// Create (truncate) the run log file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: BufWriter::new(file),
            quiet: false,
        })
    }

    /// Create a run log that only writes to the file
    pub fn create_quiet(path: &Path) -> Result<Self> {
        let mut log = Self::create(path)?;
        log.quiet = true;
        Ok(log)
    }

    /// Emit one status line to console and file
    ///
    /// A failing log-file write must not abort the extraction; it is
    /// reported once through the standard logger instead.
    pub fn line(&mut self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
        let stamped = format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        if let Err(e) = writeln!(self.file, "{}", stamped) {
            warn!("Failed to append to run log {}: {}", self.path.display(), e);
        }
    }

    /// Flush buffered log lines to disk
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    /// Path of the log file, for the end-of-run summary
    pub fn path(&self) -> &Path {
        &self.path
    }
}
