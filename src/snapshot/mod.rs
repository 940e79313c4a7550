//! # Process Snapshot
//!
//! Collects the running processes and the per-process metadata the engine scores.

mod sysinfo_source;

pub use sysinfo_source::SysinfoSource;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One process at snapshot time. Fields the OS would not disclose are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_mb: f64,
    pub user: Option<String>,
    pub exe_path: Option<String>,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, cpu_percent: f64, memory_mb: f64) -> Self {
        Self {
            pid,
            name: name.into(),
            cpu_percent,
            memory_mb,
            user: None,
            exe_path: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_exe_path(mut self, path: impl Into<String>) -> Self {
        self.exe_path = Some(path.into());
        self
    }
}

/// Processes gathered during one scan, plus how many vanished mid-enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub processes: Vec<ProcessRecord>,
    pub skipped: usize,
}

impl ProcessSnapshot {
    pub fn new(processes: Vec<ProcessRecord>) -> Self {
        Self {
            processes,
            skipped: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("process enumeration failed: {0}")]
    Enumeration(String),
    #[error("window enumeration failed: {0}")]
    Windows(String),
}

pub trait ProcessSource: Send {
    fn snapshot(&mut self) -> Result<ProcessSnapshot, SnapshotError>;
}
