//! User configuration (`~/.activity-heatmap/config.json`)
//!
//! Every key is optional; unset keys keep the defaults of the active
//! terminal theme.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::{FixedMetrics, HeatmapStyle, MonthLabelStrategy};
use crate::types::{HeatmapError, Result, Rgb};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub enabled_color: Option<Rgb>,
    pub disabled_color: Option<Rgb>,
    pub text_color: Option<Rgb>,
    /// Month label size in scale-independent pixels
    pub text_size_sp: Option<f64>,
    /// Device pixels per density-independent pixel
    pub density: Option<f64>,
    /// Device pixels per scale-independent pixel
    pub scaled_density: Option<f64>,
    pub month_names: Option<[String; 12]>,
    pub labels: Option<MonthLabelStrategy>,
}

impl Config {
    /// `~/.activity-heatmap/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| HeatmapError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs
            .home_dir()
            .join(".activity-heatmap")
            .join("config.json"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields the defaults; a
    /// missing file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HeatmapError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("text_size_sp", self.text_size_sp),
            ("density", self.density),
            ("scaled_density", self.scaled_density),
        ];
        for (key, value) in positive {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(HeatmapError::Config(format!(
                        "{} must be a positive number, got {}",
                        key, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Overlay the configured keys on `defaults`
    pub fn style(&self, defaults: HeatmapStyle) -> HeatmapStyle {
        HeatmapStyle {
            enabled: self.enabled_color.unwrap_or(defaults.enabled),
            disabled: self.disabled_color.unwrap_or(defaults.disabled),
            text: self.text_color.unwrap_or(defaults.text),
            text_size_sp: self.text_size_sp.unwrap_or(defaults.text_size_sp),
            month_names: self.month_names.clone().unwrap_or(defaults.month_names),
            labels: self.labels.unwrap_or(defaults.labels),
        }
    }

    pub fn metrics(&self) -> FixedMetrics {
        FixedMetrics::new(
            self.density.unwrap_or(1.0),
            self.scaled_density.unwrap_or(1.0),
        )
    }
}
