//! Session storage configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest accepted idle expiry, ten years.
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Sharding, update retry budget and idle expiry for the session store.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_shard_count")]
    pub shard_count: usize,

    /// Version-checked write attempts before an update reports a conflict
    #[serde(default = "default_max_update_attempts")]
    pub max_update_attempts: u32,

    /// Sessions idle longer than this are purged. Unset keeps them forever.
    pub session_ttl_secs: Option<u64>,

    /// Period of the maintenance sweep
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl StorageConfig {
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(Duration::from_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shard_count == 0 || self.shard_count > 1024 {
            return Err(ValidationError::InvalidStorage("shard_count must be in 1..=1024"));
        }
        if self.max_update_attempts == 0 {
            return Err(ValidationError::InvalidStorage(
                "max_update_attempts must be positive",
            ));
        }
        match self.session_ttl_secs {
            Some(0) => {
                return Err(ValidationError::InvalidStorage("session_ttl_secs must be positive"))
            }
            Some(ttl) if ttl > MAX_SESSION_TTL_SECS => {
                return Err(ValidationError::InvalidStorage(
                    "session_ttl_secs must be at most ten years",
                ))
            }
            _ => {}
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidStorage(
                "sweep_interval_secs must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            shard_count: default_shard_count(),
            max_update_attempts: default_max_update_attempts(),
            session_ttl_secs: None,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_shard_count() -> usize {
    16
}

fn default_max_update_attempts() -> u32 {
    8
}

fn default_sweep_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.shard_count, 16);
        assert!(config.session_ttl().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_ttl_bounds() {
        let ttl = |secs| StorageConfig {
            session_ttl_secs: Some(secs),
            ..Default::default()
        };
        assert!(ttl(0).validate().is_err());
        assert!(ttl(3600).validate().is_ok());
        assert!(ttl(MAX_SESSION_TTL_SECS).validate().is_ok());
        assert_eq!(
            ttl(10_u64.pow(13)).validate(),
            Err(ValidationError::InvalidStorage(
                "session_ttl_secs must be at most ten years"
            ))
        );
    }

    #[test]
    fn test_zero_shards_rejected() {
        let config = StorageConfig {
            shard_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
