use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest accepted debounce window.
pub const MIN_DEBOUNCE_MS: u64 = 150;
/// Longest accepted debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

const MB: u64 = 1024 * 1024;

/// Per-session tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Requested debounce window in milliseconds. Read through
    /// [`SessionConfig::debounce_window`], which clamps it.
    pub debounce_ms: u64,
    /// Largest background-context upload, in bytes.
    pub context_upload_max_bytes: u64,
    /// Largest clinical-evidence upload, in bytes.
    pub evidence_upload_max_bytes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            context_upload_max_bytes: 5 * MB,
            evidence_upload_max_bytes: 10 * MB,
        }
    }
}

impl SessionConfig {
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS))
    }
}

/// Whole megabytes, for user-facing limits.
pub(crate) fn whole_megabytes(bytes: u64) -> u64 {
    bytes / MB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_window_is_clamped() {
        let config = SessionConfig::default();
        assert_eq!(config.debounce_window(), Duration::from_millis(200));
        assert_eq!(
            config.clone().with_debounce_ms(10).debounce_window(),
            Duration::from_millis(150)
        );
        assert_eq!(
            config.with_debounce_ms(5_000).debounce_window(),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn default_limits() {
        let config = SessionConfig::default();
        assert_eq!(whole_megabytes(config.context_upload_max_bytes), 5);
        assert_eq!(whole_megabytes(config.evidence_upload_max_bytes), 10);
    }
}
