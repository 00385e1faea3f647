//! Configuration loading.

use std::fs;
use std::path::Path;

use crate::error::{HrError, HrResult};

use super::types::AppConfig;

/// Loads and provides access to the company configuration.
///
/// # Example
///
/// ```no_run
/// use taskwork_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/company.yaml")?;
/// println!("Company: {}", loader.config().company.name);
/// # Ok::<(), taskwork_engine::error::HrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when the file is missing and
    /// `ConfigParseError` when it contains invalid YAML or lacks required
    /// fields.
    pub fn load<P: AsRef<Path>>(path: P) -> HrResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = serde_yaml::from_str(&content).map_err(|e| HrError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load("./config/company.yaml");
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().company.name, "Karen Roses");
        assert_eq!(loader.config().accounts.wages_account_name, "Daily Rate Wages");
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/company.yaml");
        match result {
            Err(HrError::ConfigNotFound { path }) => {
                assert!(path.contains("company.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }
}
