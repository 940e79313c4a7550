//! Sentinel: scans running processes and visible windows, scores each process
//! for disruption, flags windowless CPU-active processes, and offers manual
//! corrective actions.

pub mod actions;
pub mod audit;
pub mod config;
pub mod engine;
pub mod logging;
pub mod network;
pub mod scanner;
pub mod scheduler;
pub mod snapshot;
pub mod utils;
pub mod window_list;

pub use config::{EngineConfig, SentinelConfig, StealthPolicy};
pub use engine::{ClassifiedProcess, Classifier, ScanReport};
pub use scanner::{ScanError, Scanner};
