//! # Network Module
//!
//! Reads the state of a named network interface and builds the command that
//! disables it. Everything goes through a [`CommandRunner`] so the OS utilities
//! (`netsh` on Windows, `ip` elsewhere) can be replaced in tests.

mod command_runner;

pub use command_runner::{CommandError, CommandRunner, SystemCommandRunner};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Up/down state of the monitored interface at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStatus {
    pub name: String,
    pub up: bool,
}

impl InterfaceStatus {
    pub fn new(name: impl Into<String>, up: bool) -> Self {
        Self {
            name: name.into(),
            up,
        }
    }
}

/// Returns whether `name` is enabled and connected. Any failure reads as `false`.
pub fn is_interface_up(runner: &dyn CommandRunner, name: &str) -> bool {
    let (program, args) = status_command(name);
    let output = match runner.run(program, &args) {
        Ok(output) => output,
        Err(e) => {
            debug!("Interface query for {} failed: {}", name, e);
            return false;
        }
    };

    let parsed = if cfg!(target_os = "windows") {
        parse_netsh_interfaces(&output, name)
    } else {
        parse_ip_link(&output, name)
    };
    parsed.unwrap_or_else(|| {
        debug!("Interface {} not found in {} output", name, program);
        false
    })
}

pub fn interface_status(runner: &dyn CommandRunner, name: &str) -> InterfaceStatus {
    InterfaceStatus::new(name, is_interface_up(runner, name))
}

fn status_command(name: &str) -> (&'static str, Vec<&str>) {
    if cfg!(target_os = "windows") {
        ("netsh", vec!["interface", "show", "interface"])
    } else {
        ("ip", vec!["-o", "link", "show", "dev", name])
    }
}

/// Program and arguments that administratively disable `name`.
pub fn disable_command(name: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "windows") {
        (
            "netsh",
            vec![
                "interface".to_string(),
                "set".to_string(),
                "interface".to_string(),
                format!("name={}", name),
                "admin=disable".to_string(),
            ],
        )
    } else {
        (
            "ip",
            vec![
                "link".to_string(),
                "set".to_string(),
                "dev".to_string(),
                name.to_string(),
                "down".to_string(),
            ],
        )
    }
}

/// Parses the `netsh interface show interface` table.
///
/// Returns `None` when no row names `name`. `Disconnected` is not `Connected`:
/// the state column is compared as a whole token.
pub fn parse_netsh_interfaces(output: &str, name: &str) -> Option<bool> {
    let wanted = name.split_whitespace().collect::<Vec<_>>().join(" ");
    for line in output.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < 4 {
            continue;
        }
        let admin = columns[0];
        if !admin.eq_ignore_ascii_case("enabled") && !admin.eq_ignore_ascii_case("disabled") {
            continue;
        }
        let interface = columns[3..].join(" ");
        if interface.eq_ignore_ascii_case(&wanted) {
            let enabled = admin.eq_ignore_ascii_case("enabled");
            let connected = columns[1].eq_ignore_ascii_case("connected");
            return Some(enabled && connected);
        }
    }
    None
}

/// Parses `ip -o link show dev <name>` output.
///
/// Returns `None` when no line describes `name`.
pub fn parse_ip_link(output: &str, name: &str) -> Option<bool> {
    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(label) = tokens.get(1) else {
            continue;
        };
        // "wlan0:" or "veth0@if3:"
        let label = label.trim_end_matches(':');
        let label = label.split('@').next().unwrap_or(label);
        if label != name {
            continue;
        }
        let up = tokens
            .windows(2)
            .any(|pair| pair[0] == "state" && pair[1] == "UP");
        return Some(up);
    }
    None
}
