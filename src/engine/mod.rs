//! # Classification Engine
//!
//! Turns a process snapshot and a window snapshot into a [`ScanReport`]:
//! disruption scores, termination eligibility, stealth flags and matched
//! distracting-site titles. `classify` is pure: no clock, no global state.

mod report;
mod rules;
mod stealth;

pub use report::{ClassifiedProcess, ScanReport, ScanStats, SiteMatch};

use std::collections::HashSet;

use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::network::InterfaceStatus;
use crate::snapshot::{ProcessRecord, ProcessSnapshot};
use crate::utils::normalize_app_name;
use crate::window_list::WindowSnapshot;

/// A snapshot record after missing or malformed fields were filled in.
#[derive(Debug, Clone)]
struct NormalizedRecord {
    pid: u32,
    name: String,
    cpu_percent: f64,
    memory_mb: f64,
    user: String,
    exe_path: String,
}

fn sanitize_metric(value: f64) -> (f64, bool) {
    if value.is_finite() && value >= 0.0 {
        (value, false)
    } else {
        (0.0, true)
    }
}

impl NormalizedRecord {
    /// Returns the record and whether anything had to be filled in.
    fn from_record(record: &ProcessRecord) -> (Self, bool) {
        let mut touched = false;

        let name = if record.name.trim().is_empty() {
            touched = true;
            format!("pid {}", record.pid)
        } else {
            record.name.clone()
        };
        let (cpu_percent, cpu_fixed) = sanitize_metric(record.cpu_percent);
        let (memory_mb, mem_fixed) = sanitize_metric(record.memory_mb);
        touched |= cpu_fixed || mem_fixed;

        let user = record.user.clone().unwrap_or_else(|| {
            touched = true;
            String::new()
        });
        let exe_path = record.exe_path.clone().unwrap_or_else(|| {
            touched = true;
            String::new()
        });

        (
            Self {
                pid: record.pid,
                name,
                cpu_percent,
                memory_mb,
                user,
                exe_path,
            },
            touched,
        )
    }
}

/// The scoring engine, built once from a validated [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct Classifier {
    config: EngineConfig,
    distracting_apps: HashSet<String>,
    browser_apps: HashSet<String>,
    site_keywords: Vec<String>,
}

impl Classifier {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let distracting_apps = config
            .distracting_apps
            .iter()
            .map(|name| normalize_app_name(name))
            .collect();
        let browser_apps = config
            .browser_apps
            .iter()
            .map(|name| normalize_app_name(name))
            .collect();
        let mut site_keywords: Vec<String> = config
            .distracting_site_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        site_keywords.sort();
        site_keywords.dedup();

        Ok(Self {
            config,
            distracting_apps,
            browser_apps,
            site_keywords,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds the report for one scan.
    pub fn classify(
        &self,
        snapshot: &ProcessSnapshot,
        windows: &WindowSnapshot,
        network: InterfaceStatus,
    ) -> ScanReport {
        let mut stats = ScanStats {
            skipped_by_provider: snapshot.skipped,
            ..ScanStats::default()
        };

        let mut seen = HashSet::with_capacity(snapshot.processes.len());
        let mut records = Vec::with_capacity(snapshot.processes.len());
        for record in &snapshot.processes {
            if !seen.insert(record.pid) {
                stats.duplicates_dropped += 1;
                continue;
            }
            let (normalized, touched) = NormalizedRecord::from_record(record);
            if touched {
                stats.normalized += 1;
            }
            records.push(normalized);
        }

        let windowed = stealth::windowed_pids(windows, self.config.stealth_policy);
        let stealth_checked = windowed.is_some();

        let mut processes: Vec<ClassifiedProcess> = records
            .iter()
            .map(|record| {
                let score = self.score(&record.name, record.cpu_percent, record.memory_mb);
                let stealth = windowed.as_ref().is_some_and(|pids| {
                    stealth::is_stealth(
                        record.pid,
                        record.cpu_percent,
                        pids,
                        self.config.stealth_activity_threshold_percent,
                    )
                });
                ClassifiedProcess {
                    pid: record.pid,
                    name: record.name.clone(),
                    cpu_percent: record.cpu_percent,
                    memory_mb: record.memory_mb,
                    user: record.user.clone(),
                    exe_path: record.exe_path.clone(),
                    score,
                    safe_to_terminate: self.is_safe_to_terminate(&record.user, &record.exe_path),
                    flagged_high: u32::from(score) >= self.config.flag_score_threshold,
                    stealth,
                }
            })
            .collect();

        // Stable: equal CPU keeps enumeration order.
        processes.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));

        let distracting_sites = stealth::match_sites(
            windows,
            &records,
            &self.browser_apps,
            &self.site_keywords,
        );

        debug!(
            "Classified {} processes ({} normalized, {} duplicates dropped), {} site matches",
            processes.len(),
            stats.normalized,
            stats.duplicates_dropped,
            distracting_sites.len()
        );

        ScanReport {
            processes,
            distracting_sites,
            network,
            window_data_available: windows.is_available(),
            stealth_checked,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_list::WindowRecord;

    fn classifier() -> Classifier {
        Classifier::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn missing_fields_are_filled_and_counted() {
        let snapshot = ProcessSnapshot::new(vec![
            ProcessRecord::new(1, "", f64::NAN, -3.0),
            ProcessRecord::new(2, "app", 1.0, 1.0)
                .with_user("alice")
                .with_exe_path("/home/alice/app"),
        ]);
        let report = classifier().classify(
            &snapshot,
            &WindowSnapshot::Available(vec![]),
            InterfaceStatus::new("wlan0", false),
        );
        assert_eq!(report.stats.normalized, 1);
        let first = report.find(1).unwrap();
        assert_eq!(first.name, "pid 1");
        assert_eq!(first.cpu_percent, 0.0);
        assert_eq!(first.memory_mb, 0.0);
        assert_eq!(first.user, "");
    }

    #[test]
    fn duplicate_pids_keep_first_record() {
        let snapshot = ProcessSnapshot::new(vec![
            ProcessRecord::new(7, "first", 1.0, 1.0),
            ProcessRecord::new(7, "second", 90.0, 900.0),
        ]);
        let report = classifier().classify(
            &snapshot,
            &WindowSnapshot::Unavailable,
            InterfaceStatus::new("wlan0", false),
        );
        assert_eq!(report.processes.len(), 1);
        assert_eq!(report.processes[0].name, "first");
        assert_eq!(report.stats.duplicates_dropped, 1);
    }

    #[test]
    fn site_keywords_do_not_change_scores() {
        let snapshot = ProcessSnapshot::new(vec![ProcessRecord::new(5, "firefox", 1.0, 50.0)]);
        let windows = WindowSnapshot::Available(vec![WindowRecord::new(
            Some(5),
            "reddit - dive into anything",
        )]);
        let report =
            classifier().classify(&snapshot, &windows, InterfaceStatus::new("wlan0", true));
        assert_eq!(report.distracting_sites.len(), 1);
        assert_eq!(report.processes[0].score, 0);
    }
}
