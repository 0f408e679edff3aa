mod args;
mod error;
mod fetch;
mod log;
mod network;
mod output;

pub use args::Args;
pub use error::ConfigError;
pub use fetch::FetchConfig;
pub use log::LogConfig;
pub use network::{
    DEFAULT_REGISTRY_ADDRESS, NetworkConfig, NetworkError, NetworkTable, builtin_networks,
};
pub use output::OutputConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "RA_";
const DEFAULT_ENV_FILE: &str = ".env";

/// Flat view of the `RA_*` environment, as envy sees it.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "default_networks")]
    networks: Vec<String>,
    #[serde(default)]
    extra_networks: Option<String>,

    #[serde(default = "fetch::default_snapshot_dir")]
    snapshot_dir: String,
    #[serde(default = "fetch::default_max_concurrent")]
    max_concurrent: usize,
    #[serde(default = "fetch::default_decode_addresses")]
    decode_addresses: bool,

    #[serde(default = "output::default_dir")]
    output_dir: String,
    #[serde(default = "output::default_file_name")]
    output_file: String,
}

fn default_networks() -> Vec<String> {
    vec!["testnet".to_string(), "mainnet".to_string()]
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub log: LogConfig,

    /// Networks to fetch, in fold order
    ///
    /// Env: RA_NETWORKS (comma separated keys)
    /// Default: testnet,mainnet
    pub networks: Vec<NetworkConfig>,

    pub fetch: FetchConfig,

    pub output: OutputConfig,
}

impl AggregatorConfig {
    /// Load the env file named in `args`, then build the configuration from the
    /// process environment with the command line overrides applied.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        load_env_file(&args.env_file)?;
        Self::from_vars(std::env::vars(), args)
    }

    /// Build the configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I, args: &Args) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;

        let extras = match env.extra_networks.as_deref().map(str::trim) {
            None | Some("") => Vec::new(),
            Some(json) => serde_json::from_str::<Vec<NetworkConfig>>(json)
                .map_err(|e| ConfigError::InvalidExtraNetworksJson(e.to_string()))?,
        };
        let table = NetworkTable::with_extras(extras)?;

        let keys = if args.networks.is_empty() {
            env.networks
        } else {
            args.networks.clone()
        };
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let networks = table.select(&keys)?;

        let config = Self {
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            networks,
            fetch: FetchConfig {
                snapshot_dir: args.snapshot_dir.clone().unwrap_or(env.snapshot_dir),
                max_concurrent: env.max_concurrent,
                decode_addresses: env.decode_addresses,
            },
            output: OutputConfig {
                dir: args.output_dir.clone().unwrap_or(env.output_dir),
                file_name: env.output_file,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.is_empty() {
            return Err(ConfigError::ValidateError(
                "At least one network must be selected".to_string(),
            ));
        }
        self.log.validate()?;
        self.fetch.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            networks: builtin_networks(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Load variables from a dotenv file. A missing default `.env` is not an error;
/// a missing file that was asked for explicitly is.
pub fn load_env_file(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() || (path == DEFAULT_ENV_FILE && !Path::new(path).exists()) {
        return Ok(());
    }

    dotenv::from_filename(path)
        .map(|_| ())
        .map_err(|source| ConfigError::EnvFileError {
            path: path.to_string(),
            source,
        })
}
