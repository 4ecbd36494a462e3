//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `MEYE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use meye_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Consuming {}", config.worker.queue_name);
//! ```

mod error;
mod logging;
mod redis;
mod worker;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use redis::RedisConfig;
pub use worker::WorkerConfig;

use serde::Deserialize;

/// Root configuration of the `meye-worker` process.
///
/// Every section has defaults, so an empty environment yields a worker
/// pointed at a local Redis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Redis connection (event queue)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Consume loop settings
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEYE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MEYE__REDIS__URL=redis://...` -> `redis.url`
    /// - `MEYE__WORKER__RECEIVE_TIMEOUT_SECS=10` -> `worker.receive_timeout_secs = 10`
    /// - `MEYE__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEYE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.redis.validate()?;
        self.worker.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
