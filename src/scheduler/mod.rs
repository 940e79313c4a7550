// Scheduler for periodic, non-overlapping scans

use chrono::{DateTime, Duration, Local};

/// Decides when the next automatic scan is due.
///
/// It never starts a scan itself: the caller polls [`ScanScheduler::is_due`] and
/// goes through the same exclusive scan path as a manual request, so periodic
/// scans can't overlap.
#[derive(Debug, Clone)]
pub struct ScanScheduler {
    interval: Option<Duration>,
    last_run: Option<DateTime<Local>>,
    next_run: Option<DateTime<Local>>,
}

impl ScanScheduler {
    /// `None` disables automatic scanning.
    pub fn new(interval_secs: Option<u64>) -> Self {
        Self {
            interval: interval_secs.map(|secs| Duration::seconds(secs as i64)),
            last_run: None,
            next_run: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        if !self.is_enabled() {
            return false;
        }

        match &self.next_run {
            Some(next_run) => now >= *next_run,
            None => true, // First run
        }
    }

    /// Records a scan start, manual or automatic, and pushes the next run out.
    pub fn mark_run(&mut self, at: DateTime<Local>) {
        self.last_run = Some(at);
        self.next_run = self.interval.map(|interval| at + interval);
    }

    pub fn last_run(&self) -> Option<DateTime<Local>> {
        self.last_run
    }

    pub fn next_run(&self) -> Option<DateTime<Local>> {
        self.next_run
    }
}
