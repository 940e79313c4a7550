use std::fs;

use chrono::{FixedOffset, TimeZone};
use sentinel::audit::AuditLog;
use sentinel::config::EngineConfig;
use sentinel::network::InterfaceStatus;
use sentinel::snapshot::{ProcessRecord, ProcessSnapshot};
use sentinel::window_list::WindowSnapshot;
use sentinel::{Classifier, ScanReport};
use tempfile::TempDir;

fn report() -> ScanReport {
    let classifier = Classifier::new(EngineConfig::default()).unwrap();
    let snapshot = ProcessSnapshot::new(vec![ProcessRecord::new(42, "discord", 20.0, 300.0)]);
    classifier.classify(
        &snapshot,
        &WindowSnapshot::Available(Vec::new()),
        InterfaceStatus::new("Wi-Fi", true),
    )
}

#[test]
fn test_append_writes_timestamped_block() {
    let dir = TempDir::new().unwrap();
    let log = AuditLog::new(dir.path().join("logs").join("scan_log.txt"));
    let at = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 5, 9, 7, 1)
        .unwrap();

    let report = report();
    log.append(&report, &at).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    let expected = format!("[2024-03-05 09:07:01]\n{}\n\n", report.to_string().trim_end());
    assert_eq!(content, expected);
}

#[test]
fn test_append_keeps_previous_entries() {
    let dir = TempDir::new().unwrap();
    let log = AuditLog::new(dir.path().join("scan_log.txt"));
    let offset = FixedOffset::east_opt(3600).unwrap();
    let first = offset.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let second = offset.with_ymd_and_hms(2024, 1, 1, 11, 30, 0).unwrap();

    log.append(&report(), &first).unwrap();
    log.append(&report(), &second).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    let blocks: Vec<&str> = content.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("[2024-01-01 10:00:00]\n"));
    assert!(blocks[1].starts_with("[2024-01-01 11:30:00]\n"));
    assert!(content.ends_with("\n\n"));
}
