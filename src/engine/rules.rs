// Scoring and termination-eligibility rules

use super::Classifier;
use crate::utils::{normalize_app_name, path_has_prefix};

const DISTRACTING_APP_POINTS: u32 = 30;
const HIGH_CPU_POINTS: u32 = 15;
const HIGH_MEMORY_POINTS: u32 = 15;
const MAX_SCORE: u32 = 100;

impl Classifier {
    /// Disruption score in `0..=100`. Each rule contributes independently.
    pub fn score(&self, name: &str, cpu_percent: f64, memory_mb: f64) -> u8 {
        let mut score = 0u32;
        if self.distracting_apps.contains(&normalize_app_name(name)) {
            score += DISTRACTING_APP_POINTS;
        }
        if cpu_percent > self.config.cpu_threshold_percent {
            score += HIGH_CPU_POINTS;
        }
        if memory_mb > self.config.mem_threshold_mb {
            score += HIGH_MEMORY_POINTS;
        }
        score.min(MAX_SCORE) as u8
    }

    /// Unsafe when the executable sits under a protected prefix or the owner
    /// looks like a system account. Anything else is safe.
    pub fn is_safe_to_terminate(&self, user: &str, exe_path: &str) -> bool {
        let protected_path = self
            .config
            .protected_path_prefixes
            .iter()
            .any(|prefix| path_has_prefix(exe_path, prefix));
        let system_user = user.to_lowercase().contains("system");
        !(protected_path || system_user)
    }
}
