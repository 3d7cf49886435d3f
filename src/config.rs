// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read from the file named by `WILDWATCH_CONFIG`, or from
//! `wildwatch.yaml` in the working directory. Missing files fall back to
//! defaults; YAML or JSON is chosen by extension.

use crate::api::ApiMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "WILDWATCH_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "wildwatch.yaml";

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_mode: ApiMode,
    pub confidence_threshold: f32,
    pub theme: Theme,
    /// Only detections with this label are shown in Analysis.
    pub target_label: Option<String>,
    pub max_uploads: usize,
    /// Multiplier applied to simulated API delays.
    pub mock_latency: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_mode: ApiMode::Mock,
            confidence_threshold: 0.7,
            theme: Theme::Light,
            target_label: Some("bear".to_string()),
            max_uploads: 20,
            mock_latency: 1.0,
        }
    }
}

impl Settings {
    /// Load settings from the configured location, or defaults.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    log::info!("No settings file found, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        Self::from_file(&path)
    }

    /// Parse a YAML or JSON settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let settings: Settings = match extension {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON settings in {}", path.display()))?,
            _ => serde_yaml::from_str(&text)
                .with_context(|| format!("Invalid YAML settings in {}", path.display()))?,
        };

        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp out-of-range values instead of failing.
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            let clamped = if self.confidence_threshold.is_nan() {
                Settings::default().confidence_threshold
            } else {
                self.confidence_threshold.clamp(0.0, 1.0)
            };
            log::warn!(
                "confidence_threshold {} out of range, using {}",
                self.confidence_threshold,
                clamped
            );
            self.confidence_threshold = clamped;
        }
        if self.max_uploads == 0 {
            log::warn!("max_uploads must be at least 1");
            self.max_uploads = 1;
        }
        if !self.mock_latency.is_finite() || self.mock_latency < 0.0 {
            log::warn!("mock_latency {} is invalid, using 1.0", self.mock_latency);
            self.mock_latency = 1.0;
        }
        if self.target_label.as_deref().is_some_and(str::is_empty) {
            self.target_label = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "theme: dark\nconfidence_threshold: 0.5").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.confidence_threshold, 0.5);
        assert_eq!(settings.api_mode, ApiMode::Mock);
        assert_eq!(settings.max_uploads, 20);
    }

    #[test]
    fn test_json_settings() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"api_mode": "real", "target_label": null}}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.api_mode, ApiMode::Real);
        assert_eq!(settings.target_label, None);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings {
            confidence_threshold: 1.7,
            max_uploads: 0,
            mock_latency: -2.0,
            target_label: Some(String::new()),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.confidence_threshold, 1.0);
        assert_eq!(settings.max_uploads, 1);
        assert_eq!(settings.mock_latency, 1.0);
        assert_eq!(settings.target_label, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "confidence_threshold: [not, a, number]").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }
}
