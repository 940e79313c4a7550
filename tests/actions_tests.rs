use std::cell::RefCell;

use sentinel::actions::{terminate, ActionError, ProcessControl};
use sentinel::config::EngineConfig;
use sentinel::network::InterfaceStatus;
use sentinel::snapshot::{ProcessRecord, ProcessSnapshot};
use sentinel::window_list::WindowSnapshot;
use sentinel::{Classifier, ScanReport};

/// Records kill requests; PIDs in `gone` behave as already exited.
#[derive(Default)]
struct FakeControl {
    killed: RefCell<Vec<(u32, String)>>,
    gone: Vec<u32>,
}

impl ProcessControl for FakeControl {
    fn kill(&self, pid: u32, expected_name: &str) -> Result<(), ActionError> {
        if self.gone.contains(&pid) {
            return Err(ActionError::ProcessGone {
                pid,
                name: expected_name.to_string(),
            });
        }
        self.killed
            .borrow_mut()
            .push((pid, expected_name.to_string()));
        Ok(())
    }
}

fn report() -> ScanReport {
    let config = EngineConfig {
        protected_path_prefixes: vec!["/usr/sbin/".to_string()],
        ..EngineConfig::default()
    };
    let classifier = Classifier::new(config).unwrap();
    let snapshot = ProcessSnapshot::new(vec![
        ProcessRecord::new(100, "discord", 20.0, 300.0)
            .with_user("alice")
            .with_exe_path("/opt/discord/discord"),
        ProcessRecord::new(200, "sshd", 0.1, 8.0)
            .with_user("root")
            .with_exe_path("/usr/sbin/sshd"),
        ProcessRecord::new(300, "svc", 0.1, 8.0).with_user("SYSTEM"),
    ]);
    classifier.classify(
        &snapshot,
        &WindowSnapshot::Available(Vec::new()),
        InterfaceStatus::new("wlan0", true),
    )
}

#[test]
fn test_terminate_safe_process() {
    let control = FakeControl::default();
    let message = terminate(&report(), 100, &control).unwrap();
    assert_eq!(message, "discord (PID 100) terminated.");
    assert_eq!(
        control.killed.borrow().as_slice(),
        &[(100, "discord".to_string())]
    );
}

#[test]
fn test_terminate_unknown_pid() {
    let control = FakeControl::default();
    let result = terminate(&report(), 999, &control);
    assert!(matches!(result, Err(ActionError::UnknownPid(999))));
    assert!(control.killed.borrow().is_empty());
}

#[test]
fn test_terminate_refuses_protected_processes() {
    let control = FakeControl::default();
    let report = report();

    assert!(matches!(
        terminate(&report, 200, &control),
        Err(ActionError::Protected { pid: 200, .. })
    ));
    assert!(matches!(
        terminate(&report, 300, &control),
        Err(ActionError::Protected { pid: 300, .. })
    ));
    assert!(control.killed.borrow().is_empty());
}

#[test]
fn test_terminate_exited_process() {
    let control = FakeControl {
        gone: vec![100],
        ..FakeControl::default()
    };
    let result = terminate(&report(), 100, &control);
    assert!(matches!(result, Err(ActionError::ProcessGone { pid: 100, .. })));
}
