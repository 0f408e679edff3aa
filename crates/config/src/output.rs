use crate::ConfigError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory the aggregated dataset is written to
    ///
    /// Env: RA_OUTPUT_DIR
    /// Default: data
    pub dir: String,

    /// File name of the aggregated dataset
    ///
    /// Env: RA_OUTPUT_FILE
    /// Default: addresses.json
    pub file_name: String,
}

pub(crate) fn default_dir() -> String {
    "data".to_string()
}

pub(crate) fn default_file_name() -> String {
    "addresses.json".to_string()
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.file_name)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.is_empty() {
            return Err(ConfigError::ValidateError(
                "Output directory cannot be empty".to_string(),
            ));
        }

        if self.file_name.is_empty() || self.file_name.contains(['/', '\\']) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid output file name '{}'",
                self.file_name
            )));
        }

        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            file_name: default_file_name(),
        }
    }
}
