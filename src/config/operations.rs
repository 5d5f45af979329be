//! Config loading, validation, and serialization.

use super::model::SimConfig;
use super::types::MAX_PARTICIPANTS_PER_CATEGORY;
use crate::error::{FairgateError, Result};
use crate::gate::Category;
use std::path::Path;

impl SimConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(SimConfig)` - Successfully loaded and validated config
    /// * `Err(FairgateError::UserError)` - The file could not be read
    /// * `Err(FairgateError::ConfigError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FairgateError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)
            .map_err(|e| FairgateError::ConfigError(format!("failed to parse YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| FairgateError::ConfigError(format!("failed to serialize YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - at most [`MAX_PARTICIPANTS_PER_CATEGORY`] participants per category
    /// - at least one participant overall
    /// - `usage_min_ms` must not exceed `usage_max_ms`
    /// - labels must be non-empty and distinct
    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let count = self.participants(category);
            if count > MAX_PARTICIPANTS_PER_CATEGORY {
                return Err(FairgateError::ConfigError(format!(
                    "participants_{} ({}) exceeds the limit of {}",
                    category.as_str(),
                    count,
                    MAX_PARTICIPANTS_PER_CATEGORY
                )));
            }
        }

        if self.total_participants() == 0 {
            return Err(FairgateError::ConfigError(
                "at least one participant is required".to_string(),
            ));
        }

        if self.usage_min_ms > self.usage_max_ms {
            return Err(FairgateError::ConfigError(format!(
                "usage_min_ms ({}) must not exceed usage_max_ms ({})",
                self.usage_min_ms, self.usage_max_ms
            )));
        }

        let (a, b) = (self.labels.a.trim(), self.labels.b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(FairgateError::ConfigError(
                "category labels must be non-empty".to_string(),
            ));
        }
        if a == b {
            return Err(FairgateError::ConfigError(format!(
                "category labels must be distinct (both are '{}')",
                a
            )));
        }

        Ok(())
    }
}
