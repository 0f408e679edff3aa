use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory holding one `<network key>.json` registry snapshot per network
    ///
    /// Env: RA_SNAPSHOT_DIR
    /// Default: snapshots
    pub snapshot_dir: String,

    /// Maximum number of networks fetched at the same time
    ///
    /// Env: RA_MAX_CONCURRENT
    /// Default: 4
    pub max_concurrent: usize,

    /// Decode contract address bytes into chain-native addresses.
    /// When disabled, contracts keep the raw hex payload.
    ///
    /// Env: RA_DECODE_ADDRESSES
    /// Default: true
    pub decode_addresses: bool,
}

pub(crate) fn default_snapshot_dir() -> String {
    "snapshots".to_string()
}

pub(crate) fn default_max_concurrent() -> usize {
    4
}

pub(crate) fn default_decode_addresses() -> bool {
    true
}

impl FetchConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot_dir.is_empty() {
            return Err(ConfigError::ValidateError(
                "Snapshot directory cannot be empty".to_string(),
            ));
        }

        if self.max_concurrent == 0 {
            return Err(ConfigError::ValidateError(
                "Max concurrent fetches cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            max_concurrent: default_max_concurrent(),
            decode_addresses: default_decode_addresses(),
        }
    }
}
