//! Event worker configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings of the `meye-worker` consume loop.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Redis list the events are pushed to and popped from
    #[serde(default = "default_queue_name")]
    pub queue_name: String,

    /// How long one receive blocks waiting for an event
    #[serde(default = "default_receive_timeout")]
    pub receive_timeout_secs: u64,

    /// Pause after a queue failure before retrying
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,

    /// Skip events a handler has already applied
    #[serde(default = "default_idempotent")]
    pub idempotent: bool,

    /// How long processed-event records are kept for deduplication
    #[serde(default = "default_processed_retention")]
    pub processed_retention_secs: u64,

    /// How often expired processed-event records are deleted
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl WorkerConfig {
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_secs(self.receive_timeout_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    pub fn processed_retention(&self) -> Duration {
        Duration::from_secs(self.processed_retention_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.queue_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WORKER_QUEUE_NAME"));
        }
        if self.receive_timeout_secs == 0 || self.receive_timeout_secs > 300 {
            return Err(ValidationError::InvalidReceiveTimeout);
        }
        if !(MIN_RETENTION_SECS..=MAX_RETENTION_SECS).contains(&self.processed_retention_secs) {
            return Err(ValidationError::InvalidRetention);
        }
        if self.cleanup_interval_secs == 0 {
            return Err(ValidationError::InvalidCleanupInterval);
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_name: default_queue_name(),
            receive_timeout_secs: default_receive_timeout(),
            error_backoff_secs: default_error_backoff(),
            idempotent: default_idempotent(),
            processed_retention_secs: default_processed_retention(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

const MIN_RETENTION_SECS: u64 = 60;
const MAX_RETENTION_SECS: u64 = 365 * 24 * 60 * 60;

fn default_queue_name() -> String {
    "meye:events".to_string()
}

fn default_receive_timeout() -> u64 {
    5
}

fn default_error_backoff() -> u64 {
    1
}

fn default_idempotent() -> bool {
    true
}

fn default_processed_retention() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval() -> u64 {
    60 * 60
}
