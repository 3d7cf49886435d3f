// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Detection data structures.
//!
//! This module defines detector output (normalized boxes with labels and
//! confidences) and the threshold filter applied before projection.

use super::media::MediaAsset;
use serde::{Deserialize, Serialize};

/// A rectangle in normalized coordinates (0.0 to 1.0), top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Behavior observed for a detected animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorState {
    Resting,
    Moving,
}

impl BehaviorState {
    pub fn label(&self) -> &'static str {
        match self {
            BehaviorState::Resting => "Resting",
            BehaviorState::Moving => "Moving",
        }
    }
}

/// One detector hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: String,
    pub label: String,
    #[serde(rename = "conf")]
    pub confidence: f32,
    pub state: BehaviorState,
    #[serde(rename = "box")]
    pub bbox: NormalizedBox,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "ts")]
    pub timestamp_ms: i64,
}

impl Detection {
    /// Caption drawn above the box, e.g. `"bear • 91%"`.
    pub fn caption(&self) -> String {
        format!("{} • {:.0}%", self.label, self.confidence * 100.0)
    }
}

/// Media plus detections, as returned by the analysis API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub media: MediaAsset,
    pub detections: Vec<Detection>,
}

/// Keep detections with `confidence >= threshold`, preserving order.
pub fn filter_by_confidence(detections: &[Detection], threshold: f32) -> Vec<&Detection> {
    detections.iter().filter(|d| d.confidence >= threshold).collect()
}

/// The set shown in the Analysis view: optional label match, then threshold.
pub fn visible_detections<'a>(
    detections: &'a [Detection],
    threshold: f32,
    target_label: Option<&str>,
) -> Vec<&'a Detection> {
    filter_by_confidence(detections, threshold)
        .into_iter()
        .filter(|d| target_label.map_or(true, |label| d.label == label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(id: &str, label: &str, confidence: f32) -> Detection {
        Detection {
            id: id.to_string(),
            label: label.to_string(),
            confidence,
            state: BehaviorState::Moving,
            bbox: NormalizedBox { x: 0.1, y: 0.1, w: 0.2, h: 0.2 },
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_threshold_keeps_order() {
        let dets = vec![det("1", "bear", 0.91), det("2", "bear", 0.84), det("3", "bear", 0.63)];
        let visible = filter_by_confidence(&dets, 0.7);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[1].id, "2");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let dets = vec![det("1", "bear", 0.7)];
        assert_eq!(filter_by_confidence(&dets, 0.7).len(), 1);
        assert!(filter_by_confidence(&dets, 0.71).is_empty());
        assert_eq!(filter_by_confidence(&dets, 0.0).len(), 1);
    }

    #[test]
    fn test_visible_detections_label_filter() {
        let dets = vec![det("1", "bear", 0.86), det("2", "bear", 0.68), det("3", "tree", 0.91)];
        let bears = visible_detections(&dets, 0.7, Some("bear"));
        assert_eq!(bears.len(), 1);
        assert_eq!(bears[0].id, "1");

        let all = visible_detections(&dets, 0.7, None);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_caption() {
        assert_eq!(det("1", "bear", 0.914).caption(), "bear • 91%");
    }

    #[test]
    fn test_detection_wire_names() {
        let json = r#"{"id":"1","label":"bear","conf":0.91,"state":"resting",
            "box":{"x":0.12,"y":0.22,"w":0.22,"h":0.18},"ts":1700000000000}"#;
        let d: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(d.state, BehaviorState::Resting);
        assert_eq!(d.bbox.w, 0.22);
        assert_eq!(d.timestamp_ms, 1_700_000_000_000);
    }
}
