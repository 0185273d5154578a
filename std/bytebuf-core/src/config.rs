///
/// Buffer Configuration
///
/// Tunables shared by every buffer created in the process. A configuration is
/// parsed from TOML and installed once; afterwards it is read-only.
///
/// ## Example bytebuf.toml
///
/// ```toml
/// pool_size = 8192
/// max_length = 4294967296
/// inspect_max_bytes = 50
/// ```
///
/// Missing keys fall back to their defaults.
///

use crate::error::{BufferError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_POOL_SIZE: usize = 8 * 1024;
#[cfg(target_pointer_width = "64")]
pub const DEFAULT_MAX_LENGTH: usize = 1 << 32;
#[cfg(not(target_pointer_width = "64"))]
pub const DEFAULT_MAX_LENGTH: usize = isize::MAX as usize;
pub const DEFAULT_INSPECT_MAX_BYTES: usize = 50;

static INSTALLED: OnceLock<BufferConfig> = OnceLock::new();
static DEFAULTS: OnceLock<BufferConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    /// Size of the slab small unsafe allocations are carved from.
    pub pool_size: usize,
    /// Largest accepted allocation, in bytes.
    pub max_length: usize,
    /// Bytes shown by `inspect` before eliding the rest.
    pub inspect_max_bytes: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            max_length: DEFAULT_MAX_LENGTH,
            inspect_max_bytes: DEFAULT_INSPECT_MAX_BYTES,
        }
    }
}

impl BufferConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: BufferConfig =
            toml::from_str(source).map_err(|e| BufferError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            BufferError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.max_length > isize::MAX as usize {
            return Err(BufferError::Config(format!(
                "max_length {} exceeds the platform limit {}",
                self.max_length,
                isize::MAX
            )));
        }
        Ok(())
    }
}

/// Installs the process-wide configuration. Only the first call succeeds.
pub fn install(config: BufferConfig) -> Result<()> {
    config.validate()?;
    tracing::debug!(
        pool_size = config.pool_size,
        max_length = config.max_length,
        inspect_max_bytes = config.inspect_max_bytes,
        "installing buffer configuration"
    );
    INSTALLED
        .set(config)
        .map_err(|_| BufferError::Config("configuration already installed".to_string()))
}

pub fn current() -> &'static BufferConfig {
    INSTALLED
        .get()
        .unwrap_or_else(|| DEFAULTS.get_or_init(BufferConfig::default))
}
