// Append-only plain-text audit trail of scans

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::engine::ScanReport;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `[timestamp]`, the rendered report and a blank separator line.
    pub fn append<Tz>(&self, report: &ScanReport, at: &DateTime<Tz>) -> io::Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut block = format!("[{}]\n", at.format(TIMESTAMP_FORMAT));
        block.push_str(report.to_string().trim_end());
        block.push_str("\n\n");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())
    }
}
