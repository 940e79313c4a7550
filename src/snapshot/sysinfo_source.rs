use std::collections::{HashMap, HashSet};
use std::time::Duration;

use sysinfo::{Pid, Process, System, Users, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use super::{ProcessRecord, ProcessSnapshot, ProcessSource, SnapshotError};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// `sysinfo`-backed process table.
///
/// CPU usage is sampled over a fixed interval applied to every process at once:
/// refresh, sleep, refresh. Values are per-core, so a process saturating two
/// cores reports 200%.
pub struct SysinfoSource {
    system: System,
    users: Users,
    sample_interval: Duration,
}

impl SysinfoSource {
    pub fn new(sample_interval: Duration) -> Self {
        Self {
            system: System::new(),
            users: Users::new_with_refreshed_list(),
            sample_interval: sample_interval.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    fn user_name(&self, process: &Process) -> Option<String> {
        process
            .user_id()
            .and_then(|uid| self.users.get_user_by_id(uid))
            .map(|user| user.name().to_string())
    }
}

/// Thread IDs that sysinfo lists next to real processes on Linux.
///
/// A task set contains its own main thread, whose TID equals the PID.
fn thread_ids(table: &HashMap<Pid, Process>) -> HashSet<Pid> {
    table
        .iter()
        .filter_map(|(pid, process)| process.tasks().map(|tasks| (pid, tasks)))
        .flat_map(|(pid, tasks)| tasks.iter().filter(move |tid| *tid != pid).copied())
        .collect()
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&mut self) -> Result<ProcessSnapshot, SnapshotError> {
        self.system.refresh_processes();
        let first_threads = thread_ids(self.system.processes());
        let first_pass: HashSet<Pid> = self
            .system
            .processes()
            .keys()
            .filter(|pid| !first_threads.contains(pid))
            .copied()
            .collect();

        std::thread::sleep(self.sample_interval);

        self.system.refresh_processes();
        self.users.refresh_list();

        let table = self.system.processes();
        if table.is_empty() {
            return Err(SnapshotError::Enumeration(
                "the OS returned an empty process table".to_string(),
            ));
        }

        // Exited between the two samples.
        let skipped = first_pass.iter().filter(|pid| !table.contains_key(pid)).count();

        let threads = thread_ids(table);
        let processes: Vec<ProcessRecord> = table
            .iter()
            .filter(|(pid, _)| !threads.contains(pid))
            .map(|(pid, process)| ProcessRecord {
                pid: pid.as_u32(),
                name: process.name().to_string(),
                cpu_percent: f64::from(process.cpu_usage()),
                memory_mb: process.memory() as f64 / BYTES_PER_MB,
                user: self.user_name(process),
                exe_path: process
                    .exe()
                    .map(|path| path.to_string_lossy().to_string())
                    .filter(|path| !path.is_empty()),
            })
            .collect();

        debug!(
            "Snapshot: {} processes, {} exited during sampling",
            processes.len(),
            skipped
        );
        Ok(ProcessSnapshot { processes, skipped })
    }
}
