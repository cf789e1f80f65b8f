//! Library configuration, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuarryError, Result};
use crate::input::ParserConfig;
use crate::stats::StatisticsConfig;
use crate::validation::{DEFAULT_DATE_FORMAT, InferenceConfig, ValidatorSet};

/// Configuration for a Quarry session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    pub parser: ParserConfig,
    pub inference: InferenceConfig,
    pub statistics: StatisticsConfig,
    /// chrono pattern used by the Date validator.
    pub date_format: String,
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            inference: InferenceConfig::default(),
            statistics: StatisticsConfig::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl QuarryConfig {
    /// Load configuration from a JSON file. Absent fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| QuarryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            QuarryError::Config(format!("Invalid config '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ratio = self.inference.min_type_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(QuarryError::Config(format!(
                "inference.min_type_ratio must be between 0 and 1, got {}",
                ratio
            )));
        }

        let threshold = self.statistics.outlier_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(QuarryError::Config(format!(
                "statistics.outlier_threshold must be positive, got {}",
                threshold
            )));
        }

        if self.date_format.trim().is_empty() {
            return Err(QuarryError::Config("date_format cannot be blank".to_string()));
        }

        Ok(())
    }

    /// The validator set described by this configuration.
    pub fn validators(&self) -> ValidatorSet {
        ValidatorSet::new(&self.date_format)
    }
}
