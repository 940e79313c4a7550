//! # Window Enumerator
//!
//! Lists visible top-level windows. Platforms without a windowing system get
//! [`NoWindowSystem`], which reports window data as unavailable rather than empty.

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use win32::Win32Windows;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::snapshot::SnapshotError;

/// One visible top-level window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub owner_pid: Option<u32>,
    pub title: String,
}

impl WindowRecord {
    pub fn new(owner_pid: Option<u32>, title: impl Into<String>) -> Self {
        Self {
            owner_pid,
            title: title.into(),
        }
    }
}

/// Result of one window enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSnapshot {
    Available(Vec<WindowRecord>),
    /// No windowing system: nothing is known about windows.
    Unavailable,
}

impl WindowSnapshot {
    pub fn is_available(&self) -> bool {
        matches!(self, WindowSnapshot::Available(_))
    }

    pub fn windows(&self) -> &[WindowRecord] {
        match self {
            WindowSnapshot::Available(windows) => windows,
            WindowSnapshot::Unavailable => &[],
        }
    }

    /// PIDs owning at least one visible window.
    pub fn owner_pids(&self) -> HashSet<u32> {
        self.windows().iter().filter_map(|w| w.owner_pid).collect()
    }
}

pub trait WindowEnumerator: Send + Sync {
    fn visible_windows(&self) -> Result<WindowSnapshot, SnapshotError>;
}

/// Enumerator for environments without a windowing system.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWindowSystem;

impl WindowEnumerator for NoWindowSystem {
    fn visible_windows(&self) -> Result<WindowSnapshot, SnapshotError> {
        Ok(WindowSnapshot::Unavailable)
    }
}

/// Picks the window enumerator for the running platform.
pub fn platform_enumerator() -> Box<dyn WindowEnumerator> {
    #[cfg(target_os = "windows")]
    {
        Box::new(Win32Windows)
    }
    #[cfg(not(target_os = "windows"))]
    {
        tracing::info!("No window enumeration on this platform, stealth detection follows the configured policy");
        Box::new(NoWindowSystem)
    }
}
