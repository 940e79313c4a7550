use std::fmt;

use serde::Serialize;

use crate::network::InterfaceStatus;
use crate::utils::format_mb;

/// One process after classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedProcess {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_mb: f64,
    pub user: String,
    pub exe_path: String,
    pub score: u8,
    pub safe_to_terminate: bool,
    pub flagged_high: bool,
    pub stealth: bool,
}

impl ClassifiedProcess {
    /// Worth showing in the condensed report.
    pub fn is_notable(&self) -> bool {
        self.score > 0 || self.stealth
    }
}

/// A browser window whose title hit a distracting-site keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMatch {
    pub pid: u32,
    pub title: String,
    pub keyword: String,
}

/// Records the engine had to repair or drop, and what the provider skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub normalized: usize,
    pub duplicates_dropped: usize,
    pub skipped_by_provider: usize,
}

/// Output of one scan. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Sorted by descending CPU, ties in enumeration order.
    pub processes: Vec<ClassifiedProcess>,
    pub distracting_sites: Vec<SiteMatch>,
    pub network: InterfaceStatus,
    pub window_data_available: bool,
    pub stealth_checked: bool,
    pub stats: ScanStats,
}

impl ScanReport {
    pub fn find(&self, pid: u32) -> Option<&ClassifiedProcess> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    pub fn flagged(&self) -> impl Iterator<Item = &ClassifiedProcess> {
        self.processes.iter().filter(|p| p.flagged_high)
    }

    pub fn stealth_candidates(&self) -> impl Iterator<Item = &ClassifiedProcess> {
        self.processes.iter().filter(|p| p.stealth)
    }

    pub fn notable(&self) -> impl Iterator<Item = &ClassifiedProcess> {
        self.processes.iter().filter(|p| p.is_notable())
    }
}

impl fmt::Display for ClassifiedProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags = Vec::new();
        if self.flagged_high {
            tags.push("HIGH");
        }
        if self.stealth {
            tags.push("STEALTH");
        }
        if !self.safe_to_terminate {
            tags.push("PROTECTED");
        }
        write!(
            f,
            "{} (PID {}) - score {} - CPU: {:.1}% | Memory: {}",
            self.name,
            self.pid,
            self.score,
            self.cpu_percent,
            format_mb(self.memory_mb)
        )?;
        if !tags.is_empty() {
            write!(f, " [{}]", tags.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network interface {}: {}",
            self.network.name,
            if self.network.up { "connected" } else { "disabled" }
        )?;
        writeln!(
            f,
            "Processes: {} scanned, {} flagged, {} stealth",
            self.processes.len(),
            self.flagged().count(),
            self.stealth_candidates().count()
        )?;
        if !self.stealth_checked {
            writeln!(f, "Stealth detection: unavailable (no window data)")?;
        }

        let mut notable = self.notable().peekable();
        if notable.peek().is_none() {
            writeln!(f, "No disruptive processes found.")?;
        }
        for process in notable {
            writeln!(f, "  {}", process)?;
        }

        if !self.distracting_sites.is_empty() {
            writeln!(f, "Distracting sites:")?;
            for site in &self.distracting_sites {
                writeln!(f, "  \"{}\" ({}, PID {})", site.title, site.keyword, site.pid)?;
            }
        }

        let stats = &self.stats;
        if stats.normalized > 0 || stats.duplicates_dropped > 0 || stats.skipped_by_provider > 0 {
            write!(
                f,
                "Records: {} with missing fields, {} duplicate PIDs dropped, {} exited during scan",
                stats.normalized, stats.duplicates_dropped, stats.skipped_by_provider
            )?;
        }
        Ok(())
    }
}
