use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::nbt_cache::install_nbt_cache;

#[derive(Debug, Default, Deserialize)]
pub struct BlockConfig {
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Settings of the metadata interning cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds an entry stays eligible for deduplication after it was written.
    /// Default: 300 (5 minutes).
    #[serde(default = "default_expire_after_write_secs")]
    pub expire_after_write_secs: u64,
    /// Run a full sweep every N interns. 0 = only sweep the touched bucket.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
}

fn default_expire_after_write_secs() -> u64 {
    300
}

fn default_sweep_interval() -> u64 {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expire_after_write_secs: default_expire_after_write_secs(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl CacheConfig {
    pub fn expire_after_write(&self) -> Duration {
        Duration::from_secs(self.expire_after_write_secs)
    }
}

impl BlockConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Installs the process-wide metadata cache from the `[cache]` section.
    ///
    /// Must run before the first block carries NBT; returns `false` when the
    /// cache already exists and this config was not applied.
    pub fn install_cache(&self) -> bool {
        install_nbt_cache(&self.cache)
    }
}
