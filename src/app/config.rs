//! Configuration Management

use crate::model::{Cohort, TrialIdSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixation detection settings
    #[serde(default)]
    pub detection: DetectionConfig,
    /// AOI mapping overrides
    #[serde(default)]
    pub aoi: AoiConfig,
    /// Ordered cohort band definitions (order matters: first match wins)
    #[serde(default = "default_cohorts")]
    pub cohorts: Vec<Cohort>,
}

/// Fixation detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum run length in frames for a fixation
    pub min_frames: u32,
    /// Which trial-identifier column to group by
    #[serde(default)]
    pub trial_id_source: TrialIdSource,
}

/// AOI mapping overrides layered over the built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AoiConfig {
    /// `"target_type,region"` → category entries
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            aoi: AoiConfig::default(),
            cohorts: default_cohorts(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_frames: 3,
            trial_id_source: TrialIdSource::Trial,
        }
    }
}

fn default_cohorts() -> Vec<Cohort> {
    vec![
        Cohort::new("9mo", 8.0, 10.0),
        Cohort::new("12mo", 11.0, 13.0),
        Cohort::new("adult", 216.0, 1200.0),
    ]
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.detection.min_frames == 0 {
            return Err(crate::Error::Config(
                "detection.min_frames must be >= 1".to_string(),
            ));
        }
        for (key, category) in &self.aoi.overrides {
            if key.split(',').count() != 2 {
                return Err(crate::Error::Config(format!(
                    "aoi.overrides key must be \"target_type,region\", got {:?}",
                    key
                )));
            }
            if category.trim().is_empty() {
                return Err(crate::Error::Config(format!(
                    "aoi.overrides[{:?}] must not be empty",
                    key
                )));
            }
        }
        for cohort in &self.cohorts {
            if cohort.label.trim().is_empty() {
                return Err(crate::Error::Config(
                    "cohort label must not be empty".to_string(),
                ));
            }
            if cohort.min_months > cohort.max_months {
                return Err(crate::Error::Config(format!(
                    "cohort {:?}: min_months {} > max_months {}",
                    cohort.label, cohort.min_months, cohort.max_months
                )));
            }
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gaze_engine").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
