//! Per-resource report file sink
//!
//! One file per extracted resource, first line the fixed header, then one
//! `;`-joined line per entity, in upstream order.

use std::fmt::Debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes one resource's denormalized rows to `<dir>/<resource>.csv`
pub struct ReportWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ReportWriter {
    /// Create the report file and seed it with the header row
    pub fn create(dir: &Path, file_stem: &str, header: &str) -> Result<Self> {
        let path = dir.join(format!("{}.csv", file_stem));
        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", header)?;
        Ok(Self { path, out })
    }

    /// Append one denormalized row
    pub fn write_row(&mut self, fields: &[String]) -> Result<()> {
        writeln!(self.out, "{}", fields.join(";"))?;
        Ok(())
    }

    /// Flush buffered rows to disk
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Path of the report file, for status messages
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render a list-valued cell
///
/// Empty relations render as `[]`, never as a one-element placeholder.
pub fn list_repr<T: Debug>(items: &[T]) -> String {
    format!("{:?}", items)
}

/// Render a list of `(name, detail)` tuples
pub fn pair_list_repr<A: Debug, B: Debug>(items: &[(A, B)]) -> String {
    format!("{:?}", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ReportWriter::create(dir.path(), "projects", "Project ID;Organization").unwrap();
        writer
            .write_row(&["1".to_string(), "Default".to_string()])
            .unwrap();
        writer
            .write_row(&["2".to_string(), "Null".to_string()])
            .unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(content, "Project ID;Organization\n1;Default\n2;Null\n");
    }

    #[test]
    fn test_writer_empty_resource_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = ReportWriter::create(dir.path(), "teams", "Team ID;Team Name").unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(content, "Team ID;Team Name\n");
    }

    #[test]
    fn test_writer_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::create(dir.path(), "host_metrics", "Hostname").unwrap();
        assert!(writer.path().ends_with("host_metrics.csv"));
    }

    #[test]
    fn test_list_repr() {
        let names = vec!["alice".to_string(), "bob".to_string()];
        assert_eq!(list_repr(&names), r#"["alice", "bob"]"#);
    }

    #[test]
    fn test_list_repr_empty() {
        let names: Vec<String> = Vec::new();
        assert_eq!(list_repr(&names), "[]");
    }

    #[test]
    fn test_pair_list_repr() {
        let pairs = vec![("machine-cred".to_string(), "ssh".to_string())];
        assert_eq!(pair_list_repr(&pairs), r#"[("machine-cred", "ssh")]"#);
    }
}
