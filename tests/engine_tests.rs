use sentinel::config::{EngineConfig, StealthPolicy};
use sentinel::network::InterfaceStatus;
use sentinel::snapshot::{ProcessRecord, ProcessSnapshot};
use sentinel::window_list::{WindowRecord, WindowSnapshot};
use sentinel::Classifier;

fn classifier() -> Classifier {
    Classifier::new(EngineConfig::default()).unwrap()
}

fn windows_classifier() -> Classifier {
    let config = EngineConfig {
        protected_path_prefixes: vec![r"C:\Windows\".to_string()],
        ..EngineConfig::default()
    };
    Classifier::new(config).unwrap()
}

fn wifi_up() -> InterfaceStatus {
    InterfaceStatus::new("Wi-Fi", true)
}

fn no_windows() -> WindowSnapshot {
    WindowSnapshot::Available(Vec::new())
}

#[test]
fn test_distracting_app_over_both_thresholds_is_flagged() {
    let classifier = classifier();
    assert_eq!(classifier.score("discord.exe", 20.0, 300.0), 60);
    assert_eq!(classifier.score("Discord", 20.0, 300.0), 60);

    let snapshot = ProcessSnapshot::new(vec![ProcessRecord::new(10, "discord.exe", 20.0, 300.0)
        .with_user("alice")
        .with_exe_path(r"C:\Users\alice\AppData\Local\Discord\discord.exe")]);
    let report = classifier.classify(&snapshot, &no_windows(), wifi_up());
    let discord = report.find(10).unwrap();
    assert_eq!(discord.score, 60);
    assert!(discord.flagged_high);
    assert!(discord.safe_to_terminate);
}

#[test]
fn test_idle_unknown_app_scores_zero() {
    let classifier = classifier();
    assert_eq!(classifier.score("notepad.exe", 0.1, 10.0), 0);
}

#[test]
fn test_thresholds_are_strict() {
    let classifier = classifier();
    assert_eq!(classifier.score("notepad.exe", 15.0, 200.0), 0);
    assert_eq!(classifier.score("notepad.exe", 15.1, 200.1), 30);
}

#[test]
fn test_system_paths_and_accounts_are_protected() {
    let classifier = windows_classifier();
    assert!(!classifier.is_safe_to_terminate("alice", r"C:\Windows\System32\svchost.exe"));
    assert!(!classifier.is_safe_to_terminate("alice", "c:/windows/explorer.exe"));
    assert!(!classifier.is_safe_to_terminate("NT AUTHORITY\\SYSTEM", r"D:\tools\x.exe"));
    assert!(classifier.is_safe_to_terminate("alice", r"C:\Users\alice\app.exe"));
}

#[test]
fn test_missing_user_and_path_are_safe() {
    let classifier = windows_classifier();
    assert!(classifier.is_safe_to_terminate("", ""));

    let snapshot = ProcessSnapshot::new(vec![ProcessRecord::new(7, "mystery", 1.0, 1.0)]);
    let report = classifier.classify(&snapshot, &no_windows(), wifi_up());
    let process = report.find(7).unwrap();
    assert!(process.safe_to_terminate);
    assert_eq!(report.stats.normalized, 1);
}

#[test]
fn test_windowless_active_process_is_stealth() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(1, "miner", 5.0, 50.0),
        ProcessRecord::new(2, "editor", 5.0, 50.0),
        ProcessRecord::new(3, "idle", 0.5, 50.0),
    ]);
    let windows = WindowSnapshot::Available(vec![WindowRecord::new(Some(2), "main.rs - editor")]);

    let report = classifier.classify(&snapshot, &windows, wifi_up());
    assert!(report.stealth_checked);
    assert!(report.find(1).unwrap().stealth);
    assert!(!report.find(2).unwrap().stealth);
    assert!(!report.find(3).unwrap().stealth);
    assert_eq!(report.stealth_candidates().count(), 1);
}

#[test]
fn test_unavailable_windows_disable_stealth_by_default() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![ProcessRecord::new(1, "miner", 50.0, 50.0)]);

    let report = classifier.classify(&snapshot, &WindowSnapshot::Unavailable, wifi_up());
    assert!(!report.stealth_checked);
    assert!(!report.window_data_available);
    assert!(!report.find(1).unwrap().stealth);
    assert!(report
        .to_string()
        .contains("Stealth detection: unavailable"));
}

#[test]
fn test_unavailable_windows_can_flag_every_active_process() {
    let config = EngineConfig {
        stealth_policy: StealthPolicy::FlagActiveProcesses,
        ..EngineConfig::default()
    };
    let classifier = Classifier::new(config).unwrap();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(1, "miner", 50.0, 50.0),
        ProcessRecord::new(2, "idle", 0.0, 50.0),
    ]);

    let report = classifier.classify(&snapshot, &WindowSnapshot::Unavailable, wifi_up());
    assert!(report.stealth_checked);
    assert!(report.find(1).unwrap().stealth);
    assert!(!report.find(2).unwrap().stealth);
}

#[test]
fn test_processes_sorted_by_cpu_descending_with_stable_ties() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(1, "a", 5.0, 1.0),
        ProcessRecord::new(2, "b", 40.0, 1.0),
        ProcessRecord::new(3, "c", 40.0, 1.0),
        ProcessRecord::new(4, "d", 1.0, 1.0),
    ]);

    let report = classifier.classify(&snapshot, &no_windows(), wifi_up());
    let pids: Vec<u32> = report.processes.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![2, 3, 1, 4]);
}

#[test]
fn test_classify_is_idempotent() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(1, "chrome.exe", 30.0, 500.0),
        ProcessRecord::new(2, "background", 9.0, 20.0),
    ]);
    let windows = WindowSnapshot::Available(vec![WindowRecord::new(Some(1), "Reddit - Chrome")]);

    let first = classifier.classify(&snapshot, &windows, wifi_up());
    let second = classifier.classify(&snapshot, &windows, wifi_up());
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_duplicate_pids_keep_first_record() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(5, "first", 1.0, 1.0),
        ProcessRecord::new(5, "second", 90.0, 1.0),
    ]);

    let report = classifier.classify(&snapshot, &no_windows(), wifi_up());
    assert_eq!(report.processes.len(), 1);
    assert_eq!(report.find(5).unwrap().name, "first");
    assert_eq!(report.stats.duplicates_dropped, 1);
}

#[test]
fn test_distracting_sites_only_from_browser_windows() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(1, "firefox", 3.0, 100.0),
        ProcessRecord::new(2, "notes", 0.0, 10.0),
    ]);
    let windows = WindowSnapshot::Available(vec![
        WindowRecord::new(Some(1), "Instagram - Mozilla Firefox"),
        WindowRecord::new(Some(1), "Instagram - Mozilla Firefox"),
        WindowRecord::new(Some(2), "reddit reading list"),
        WindowRecord::new(None, "TikTok"),
    ]);

    let report = classifier.classify(&snapshot, &windows, wifi_up());
    assert_eq!(report.distracting_sites.len(), 1);
    let site = &report.distracting_sites[0];
    assert_eq!(site.pid, 1);
    assert_eq!(site.keyword, "instagram");
}

#[test]
fn test_report_text_lists_notable_processes() {
    let classifier = classifier();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(10, "discord.exe", 20.0, 300.0),
        ProcessRecord::new(11, "notepad.exe", 0.0, 5.0),
    ]);
    let windows = WindowSnapshot::Available(vec![WindowRecord::new(Some(10), "Discord")]);

    let text = classifier.classify(&snapshot, &windows, wifi_up()).to_string();
    assert!(text.starts_with("Network interface Wi-Fi: connected"));
    assert!(text.contains("Processes: 2 scanned, 1 flagged, 0 stealth"));
    assert!(text.contains("discord.exe (PID 10) - score 60"));
    assert!(!text.contains("notepad.exe"));
}

#[test]
fn test_empty_snapshot_reports_nothing_disruptive() {
    let classifier = classifier();
    let report = classifier.classify(
        &ProcessSnapshot::default(),
        &no_windows(),
        InterfaceStatus::new("Wi-Fi", false),
    );
    let text = report.to_string();
    assert!(text.contains("Network interface Wi-Fi: disabled"));
    assert!(text.contains("No disruptive processes found."));
}
