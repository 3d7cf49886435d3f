// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Simulated backend.
//!
//! Uploads tick progress on a timer, detections are a fixed YOLO-like set
//! and dashboard counts are random. Nothing leaves the machine.

use super::MediaApi;
use crate::io::media::probe_dimensions;
use crate::models::{
    dashboard::{DashboardData, Ethogram, EthogramSegment, TimeSeriesPoint, Totals},
    detection::{AnalysisResult, BehaviorState, Detection, NormalizedBox},
    media::{MediaAsset, MediaKind, SelectedFile, UploadedMedia},
};
use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local, Utc};
use rand::Rng;
use std::time::Duration;

const DEMO_MEDIA_URL: &str = "demo://bear-meadow.jpg";
const DEMO_WIDTH: u32 = 1200;
const DEMO_HEIGHT: u32 = 800;

/// In-process stand-in for the analysis service.
pub struct MockApi {
    latency: f32,
}

impl MockApi {
    /// `latency` scales every simulated delay; 0 disables sleeping.
    pub fn new(latency: f32) -> Self {
        Self { latency: latency.max(0.0) }
    }

    fn wait(&self, millis: u64) {
        if self.latency > 0.0 {
            std::thread::sleep(Duration::from_secs_f32(millis as f32 / 1000.0 * self.latency));
        }
    }
}

impl MediaApi for MockApi {
    fn upload_media(&self, file: &SelectedFile, on_progress: &mut dyn FnMut(u8)) -> Result<UploadedMedia> {
        let mut rng = rand::thread_rng();
        let mut progress: u32 = 0;

        self.wait(280);
        loop {
            progress += rng.gen_range(6..18);
            if progress >= 100 {
                on_progress(100);
                self.wait(200);
                break;
            }
            on_progress(progress as u8);
            self.wait(180);
        }

        let (width, height) = match file.kind {
            MediaKind::Image => match probe_dimensions(&file.path) {
                Some((w, h)) => (Some(w), Some(h)),
                None => (None, None),
            },
            MediaKind::Video => (None, None),
        };

        let now = Utc::now();
        let meta = UploadedMedia {
            id: format!("{}-{:04x}", now.timestamp_millis(), rng.gen::<u16>()),
            name: file.name.clone(),
            size: file.size,
            mime: file.kind.mime_prefix().to_string(),
            kind: file.kind,
            uploaded_at: now,
            path: Some(file.path.clone()),
            width,
            height,
        };

        log::info!("Mock upload finished: {} ({})", meta.name, meta.id);
        Ok(meta)
    }

    fn get_detections(&self, media: Option<&UploadedMedia>) -> Result<AnalysisResult> {
        self.wait(550);

        let media = media.map(UploadedMedia::asset).unwrap_or_else(|| MediaAsset {
            url: DEMO_MEDIA_URL.to_string(),
            kind: MediaKind::Image,
            intrinsic_width: Some(DEMO_WIDTH),
            intrinsic_height: Some(DEMO_HEIGHT),
        });

        let now = Utc::now().timestamp_millis();
        let bear = |id: &str, confidence: f32, state: BehaviorState, bbox: NormalizedBox, age_ms: i64| Detection {
            id: id.to_string(),
            label: "bear".to_string(),
            confidence,
            state,
            bbox,
            timestamp_ms: now - age_ms,
        };

        let detections = vec![
            bear(
                "1",
                0.91,
                BehaviorState::Resting,
                NormalizedBox { x: 0.12, y: 0.22, w: 0.22, h: 0.18 },
                12_000,
            ),
            bear(
                "2",
                0.84,
                BehaviorState::Moving,
                NormalizedBox { x: 0.55, y: 0.3, w: 0.27, h: 0.35 },
                9_000,
            ),
            bear(
                "3",
                0.63,
                BehaviorState::Moving,
                NormalizedBox { x: 0.4, y: 0.62, w: 0.16, h: 0.14 },
                6_000,
            ),
        ];

        Ok(AnalysisResult { media, detections })
    }

    fn get_dashboard(&self) -> Result<DashboardData> {
        self.wait(450);

        let mut rng = rand::thread_rng();
        let now = Local::now();
        let time_series: Vec<TimeSeriesPoint> = (0..8)
            .map(|i| {
                let t = now - ChronoDuration::hours(7 - i);
                let resting = rng.gen_range(2..=7);
                let moving = rng.gen_range(1..=6);
                TimeSeriesPoint {
                    time: t.format("%H:%M").to_string(),
                    resting,
                    moving,
                    count: resting + moving,
                }
            })
            .collect();

        let totals = Totals::from_series(&time_series);

        let subject = "Bear-1";
        let segments = [
            (0.0, 12.0, BehaviorState::Resting),
            (12.0, 25.0, BehaviorState::Moving),
            (25.0, 33.0, BehaviorState::Resting),
            (33.0, 47.0, BehaviorState::Moving),
            (47.0, 60.0, BehaviorState::Resting),
        ]
        .into_iter()
        .map(|(start, end, state)| EthogramSegment {
            subject: subject.to_string(),
            start,
            end,
            state,
        })
        .collect();

        Ok(DashboardData {
            time_series,
            totals,
            ethogram: Ethogram {
                subjects: vec![subject.to_string()],
                segments,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::detection::filter_by_confidence;
    use std::path::PathBuf;

    fn api() -> MockApi {
        MockApi::new(0.0)
    }

    #[test]
    fn test_upload_progress_is_monotonic_and_completes() {
        let file = SelectedFile {
            path: PathBuf::from("/nonexistent/trailcam.mp4"),
            name: "trailcam.mp4".to_string(),
            size: 42,
            kind: MediaKind::Video,
        };
        let mut seen = Vec::new();
        let meta = api().upload_media(&file, &mut |p| seen.push(p)).unwrap();

        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(meta.name, "trailcam.mp4");
        assert_eq!(meta.kind, MediaKind::Video);
        assert_eq!(meta.width, None);
    }

    #[test]
    fn test_upload_probes_image_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        image::RgbaImage::new(40, 30).save(&path).unwrap();

        let file = SelectedFile {
            path: path.clone(),
            name: "frame.png".to_string(),
            size: 100,
            kind: MediaKind::Image,
        };
        let meta = api().upload_media(&file, &mut |_| {}).unwrap();
        assert_eq!((meta.width, meta.height), (Some(40), Some(30)));
        assert_eq!(meta.path, Some(path));
    }

    #[test]
    fn test_demo_detections() {
        let result = api().get_detections(None).unwrap();
        assert_eq!(result.media.url, DEMO_MEDIA_URL);
        assert!((result.media.aspect_ratio() - 1.5).abs() < 0.0001);

        let confs: Vec<f32> = result.detections.iter().map(|d| d.confidence).collect();
        assert_eq!(confs, vec![0.91, 0.84, 0.63]);
        assert_eq!(filter_by_confidence(&result.detections, 0.7).len(), 2);
    }

    #[test]
    fn test_detections_use_selected_media() {
        let media = UploadedMedia {
            id: "x".to_string(),
            name: "clip.mov".to_string(),
            size: 1,
            mime: "video".to_string(),
            kind: MediaKind::Video,
            uploaded_at: Utc::now(),
            path: None,
            width: None,
            height: None,
        };
        let result = api().get_detections(Some(&media)).unwrap();
        assert_eq!(result.media.kind, MediaKind::Video);
        assert_eq!(result.media.intrinsic_width, None);
    }

    #[test]
    fn test_dashboard_shape() {
        let data = api().get_dashboard().unwrap();
        assert_eq!(data.time_series.len(), 8);
        for p in &data.time_series {
            assert!((2..=7).contains(&p.resting));
            assert!((1..=6).contains(&p.moving));
            assert_eq!(p.count, p.resting + p.moving);
            assert_eq!(p.time.len(), 5);
        }
        assert_eq!(data.totals, Totals::from_series(&data.time_series));
        assert_eq!(data.ethogram.subjects, vec!["Bear-1".to_string()]);
        assert_eq!(data.ethogram.segments.len(), 5);
        assert_eq!(data.ethogram.domain(), Some((0.0, 60.0)));
    }
}
