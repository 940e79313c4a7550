//! # Scanner
//!
//! Runs one scan end to end: process snapshot, window enumeration and interface
//! check on a blocking worker, bounded by a timeout, then classification.
//! Overlapping requests are rejected instead of queued.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::{ConfigError, SentinelConfig};
use crate::engine::{Classifier, ScanReport};
use crate::network::{interface_status, CommandRunner, SystemCommandRunner};
use crate::snapshot::{ProcessSource, SnapshotError, SysinfoSource};
use crate::window_list::{platform_enumerator, WindowEnumerator};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan failed: {0}")]
    ScanFailed(#[from] SnapshotError),
    #[error("scan timed out after {after:?}")]
    ScanTimeout { after: Duration },
    #[error("a scan is already in progress")]
    ScanInProgress,
    #[error("scan worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// OS-facing collaborators of a scan. Only one scan may hold them at a time.
pub struct ScanSources {
    pub processes: Box<dyn ProcessSource>,
    pub windows: Box<dyn WindowEnumerator>,
}

pub struct Scanner {
    sources: Arc<Mutex<ScanSources>>,
    classifier: Arc<Classifier>,
    runner: Arc<dyn CommandRunner>,
    interface_name: String,
    timeout: Duration,
}

impl Scanner {
    pub fn new(
        classifier: Classifier,
        sources: ScanSources,
        runner: Arc<dyn CommandRunner>,
        interface_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            sources: Arc::new(Mutex::new(sources)),
            classifier: Arc::new(classifier),
            runner,
            interface_name: interface_name.into(),
            timeout,
        }
    }

    /// Production scanner: sysinfo processes, platform windows, system utilities.
    pub fn from_config(config: &SentinelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = Classifier::new(config.engine.clone())?;
        let sources = ScanSources {
            processes: Box::new(SysinfoSource::new(Duration::from_millis(
                config.cpu_sample_interval_ms,
            ))),
            windows: platform_enumerator(),
        };
        Ok(Self::new(
            classifier,
            sources,
            Arc::new(SystemCommandRunner),
            config.interface_name.clone(),
            Duration::from_secs(config.scan_timeout_secs),
        ))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    pub async fn scan(&self) -> Result<ScanReport, ScanError> {
        let guard = Arc::clone(&self.sources)
            .try_lock_owned()
            .map_err(|_| ScanError::ScanInProgress)?;
        let runner = Arc::clone(&self.runner);
        let interface_name = self.interface_name.clone();

        // The guard travels with the worker: a stalled enumeration keeps
        // rejecting new scans until it returns.
        let worker = tokio::task::spawn_blocking(move || {
            let mut sources = guard;
            let processes = sources.processes.snapshot()?;
            let windows = sources.windows.visible_windows()?;
            let network = interface_status(runner.as_ref(), &interface_name);
            Ok::<_, SnapshotError>((processes, windows, network))
        });

        let (processes, windows, network) = match tokio::time::timeout(self.timeout, worker).await {
            Err(_) => {
                warn!("Scan timed out after {:?}", self.timeout);
                return Err(ScanError::ScanTimeout {
                    after: self.timeout,
                });
            }
            Ok(Err(join_error)) => return Err(ScanError::Worker(join_error.to_string())),
            Ok(Ok(Err(e))) => {
                warn!("Scan failed: {}", e);
                return Err(ScanError::ScanFailed(e));
            }
            Ok(Ok(Ok(collected))) => collected,
        };

        let report = self.classifier.classify(&processes, &windows, network);
        info!(
            "Scan complete: {} processes, {} flagged, {} stealth",
            report.processes.len(),
            report.flagged().count(),
            report.stealth_candidates().count()
        );
        Ok(report)
    }

    /// Runs [`Scanner::scan`] on a fresh current-thread runtime, for callers off
    /// the async world such as UI worker threads.
    pub fn scan_blocking(&self) -> Result<ScanReport, ScanError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ScanError::Worker(e.to_string()))?;
        let result = runtime.block_on(self.scan());
        // Do not wait for a stalled worker after a timeout.
        runtime.shutdown_background();
        result
    }
}
