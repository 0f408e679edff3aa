use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {source}")]
    EnvFileError {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Network configuration error: {0}")]
    NetworkError(#[from] crate::network::NetworkError),

    #[error("Invalid extra networks JSON: {0}")]
    InvalidExtraNetworksJson(String),

    #[error("{0}")]
    ValidateError(String),
}
