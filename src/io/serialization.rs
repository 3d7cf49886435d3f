// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis report serialization and deserialization.
//!
//! This module handles exporting and importing analysis reports in YAML
//! and JSON formats.

use crate::models::{
    detection::{AnalysisResult, Detection},
    media::MediaAsset,
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot of an analysis: media, threshold and the detections shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub media: MediaAsset,
    pub threshold: f32,
    pub detections: Vec<Detection>,
}

impl AnalysisReport {
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            media: self.media,
            detections: self.detections,
        }
    }
}

/// Export a report to YAML format.
pub fn export_yaml(report: &AnalysisReport, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(report)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a report to JSON format.
pub fn export_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a report from YAML format.
pub fn import_yaml(path: &Path) -> Result<AnalysisReport> {
    let yaml = std::fs::read_to_string(path)?;
    let report = serde_yaml::from_str(&yaml)?;
    Ok(report)
}

/// Import a report from JSON format.
pub fn import_json(path: &Path) -> Result<AnalysisReport> {
    let json = std::fs::read_to_string(path)?;
    let report = serde_json::from_str(&json)?;
    Ok(report)
}

/// Export, picking the format from the file extension.
pub fn export_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(report, path),
        Some("json") => export_json(report, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Import, picking the format from the file extension.
pub fn import_report(path: &Path) -> Result<AnalysisReport> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        detection::{BehaviorState, NormalizedBox},
        media::MediaKind,
    };

    fn report() -> AnalysisReport {
        AnalysisReport {
            media: MediaAsset {
                url: "cam/0001.jpg".to_string(),
                kind: MediaKind::Image,
                intrinsic_width: Some(1200),
                intrinsic_height: Some(800),
            },
            threshold: 0.7,
            detections: vec![Detection {
                id: "1".to_string(),
                label: "bear".to_string(),
                confidence: 0.91,
                state: BehaviorState::Resting,
                bbox: NormalizedBox { x: 0.12, y: 0.22, w: 0.22, h: 0.18 },
                timestamp_ms: 1_700_000_000_000,
            }],
        }
    }

    #[test]
    fn test_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let original = report();

        for name in ["report.yaml", "report.json"] {
            let path = dir.path().join(name);
            export_report(&original, &path).unwrap();
            assert_eq!(import_report(&path).unwrap(), original);
        }
    }

    #[test]
    fn test_json_uses_detection_wire_names() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(json.contains("\"conf\":0.91"));
        assert!(json.contains("\"box\""));
        assert!(json.contains("\"state\":\"resting\""));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        assert!(export_report(&report(), &path).is_err());
        assert!(!path.exists());
    }
}
