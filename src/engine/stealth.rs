// Window cross-referencing: stealth candidates and distracting-site titles

use std::collections::{HashMap, HashSet};

use super::{NormalizedRecord, SiteMatch};
use crate::config::StealthPolicy;
use crate::utils::normalize_app_name;
use crate::window_list::WindowSnapshot;

/// PIDs that own a visible window, or `None` when the stealth pass must not run.
///
/// Association is by exact owner PID. Windows without an owner never match.
pub(super) fn windowed_pids(
    windows: &WindowSnapshot,
    policy: StealthPolicy,
) -> Option<HashSet<u32>> {
    match (windows, policy) {
        (WindowSnapshot::Available(_), _) => Some(windows.owner_pids()),
        (WindowSnapshot::Unavailable, StealthPolicy::FlagActiveProcesses) => Some(HashSet::new()),
        (WindowSnapshot::Unavailable, StealthPolicy::DisabledWithoutWindows) => None,
    }
}

pub(super) fn is_stealth(
    pid: u32,
    cpu_percent: f64,
    windowed: &HashSet<u32>,
    activity_threshold: f64,
) -> bool {
    cpu_percent > activity_threshold && !windowed.contains(&pid)
}

/// Browser window titles containing a distracting keyword, deduplicated by title.
///
/// Keywords are expected lowercased and sorted; the first hit is recorded.
pub(super) fn match_sites(
    windows: &WindowSnapshot,
    records: &[NormalizedRecord],
    browser_apps: &HashSet<String>,
    keywords: &[String],
) -> Vec<SiteMatch> {
    let names: HashMap<u32, String> = records
        .iter()
        .map(|r| (r.pid, normalize_app_name(&r.name)))
        .collect();

    let mut seen_titles = HashSet::new();
    let mut matches = Vec::new();
    for window in windows.windows() {
        let Some(pid) = window.owner_pid else {
            continue;
        };
        let is_browser = names.get(&pid).is_some_and(|name| browser_apps.contains(name));
        if !is_browser {
            continue;
        }
        let title = window.title.to_lowercase();
        let Some(keyword) = keywords.iter().find(|k| title.contains(k.as_str())) else {
            continue;
        };
        if seen_titles.insert(window.title.clone()) {
            matches.push(SiteMatch {
                pid,
                title: window.title.clone(),
                keyword: keyword.clone(),
            });
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_list::WindowRecord;

    #[test]
    fn unavailable_windows_follow_policy() {
        let windows = WindowSnapshot::Unavailable;
        assert!(windowed_pids(&windows, StealthPolicy::DisabledWithoutWindows).is_none());
        let flagged = windowed_pids(&windows, StealthPolicy::FlagActiveProcesses).unwrap();
        assert!(flagged.is_empty());
    }

    #[test]
    fn activity_threshold_is_strict() {
        let none = HashSet::new();
        assert!(!is_stealth(1, 2.0, &none, 2.0));
        assert!(is_stealth(1, 2.1, &none, 2.0));
    }

    #[test]
    fn non_browser_titles_are_ignored() {
        let records = vec![NormalizedRecord {
            pid: 3,
            name: "notepad.exe".to_string(),
            cpu_percent: 0.0,
            memory_mb: 0.0,
            user: String::new(),
            exe_path: String::new(),
        }];
        let windows = WindowSnapshot::Available(vec![WindowRecord::new(Some(3), "twitter notes.txt")]);
        let browsers: HashSet<String> = ["chrome".to_string()].into_iter().collect();
        let keywords = vec!["twitter".to_string()];
        assert!(match_sites(&windows, &records, &browsers, &keywords).is_empty());
    }
}
