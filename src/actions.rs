//! # Operator Actions
//!
//! Terminating a process from the latest report and disabling the network
//! interface. Both are fire-and-forget: failures come back as [`ActionError`]
//! for the operator and are never retried.

use sysinfo::{Pid, System};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::ScanReport;
use crate::network::{disable_command, CommandRunner};
use crate::utils::is_elevated;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("PID {0} is not part of the latest scan report")]
    UnknownPid(u32),
    #[error("{name} (PID {pid}) is protected (system path or system account)")]
    Protected { pid: u32, name: String },
    #[error("{name} (PID {pid}) is no longer running")]
    ProcessGone { pid: u32, name: String },
    #[error("could not terminate {name} (PID {pid}): {reason}")]
    KillFailed {
        pid: u32,
        name: String,
        reason: String,
    },
    #[error("disabling interface {name} requires administrator privileges")]
    NotElevated { name: String },
    #[error("could not disable interface {name}: {reason}")]
    InterfaceDisable { name: String, reason: String },
}

/// Kills live processes. `expected_name` guards against PID reuse.
pub trait ProcessControl {
    fn kill(&self, pid: u32, expected_name: &str) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoControl;

impl ProcessControl for SysinfoControl {
    fn kill(&self, pid: u32, expected_name: &str) -> Result<(), ActionError> {
        let gone = || ActionError::ProcessGone {
            pid,
            name: expected_name.to_string(),
        };

        let mut system = System::new();
        let sys_pid = Pid::from_u32(pid);
        if !system.refresh_process(sys_pid) {
            return Err(gone());
        }
        let process = system.process(sys_pid).ok_or_else(gone)?;
        if !process.name().eq_ignore_ascii_case(expected_name) {
            // Same PID, different program.
            return Err(gone());
        }

        if process.kill() {
            Ok(())
        } else {
            Err(ActionError::KillFailed {
                pid,
                name: expected_name.to_string(),
                reason: "the OS refused the request (insufficient privilege?)".to_string(),
            })
        }
    }
}

/// Terminates `pid` if the latest report lists it as safe to terminate.
pub fn terminate(
    report: &ScanReport,
    pid: u32,
    control: &dyn ProcessControl,
) -> Result<String, ActionError> {
    let process = report.find(pid).ok_or(ActionError::UnknownPid(pid))?;
    if !process.safe_to_terminate {
        warn!("Refusing to terminate protected process {} (PID {})", process.name, pid);
        return Err(ActionError::Protected {
            pid,
            name: process.name.clone(),
        });
    }

    control.kill(pid, &process.name)?;
    info!("Terminated {} (PID {})", process.name, pid);
    Ok(format!("{} (PID {}) terminated.", process.name, pid))
}

/// Disables `name` through the OS network utility. Requires elevation.
pub fn disable_interface(runner: &dyn CommandRunner, name: &str) -> Result<String, ActionError> {
    disable_interface_as(runner, name, is_elevated())
}

pub fn disable_interface_as(
    runner: &dyn CommandRunner,
    name: &str,
    elevated: bool,
) -> Result<String, ActionError> {
    if !elevated {
        return Err(ActionError::NotElevated {
            name: name.to_string(),
        });
    }

    let (program, args) = disable_command(name);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match runner.run(program, &args) {
        Ok(_) => {
            info!("Network interface {} disabled", name);
            Ok(format!("{} disabled. Now rest and ground.", name))
        }
        Err(e) => {
            warn!("Disabling {} failed: {}", name, e);
            Err(ActionError::InterfaceDisable {
                name: name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}
