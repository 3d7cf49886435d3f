// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Analysis view: media preview with detection overlay.
//!
//! The media is drawn contain-fit inside the preview area and detection
//! boxes are projected onto it on every layout pass, so resizing the window
//! never leaves stale box positions behind.

use crate::api::MediaApi;
use crate::io::media::LoadedImage;
use crate::io::serialization::AnalysisReport;
use crate::models::{
    detection::{visible_detections, AnalysisResult, Detection, NormalizedBox},
    media::{MediaAsset, MediaKind, UploadedMedia},
    session::MediaSession,
};
use crate::tasks::{self, Pending};
use crate::util::geometry::{fit_contain, hit_test, project, ContainerFrame};
use std::sync::Arc;

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(0xF5, 0x9E, 0x0B);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(0x3B, 0x82, 0xF6);

/// State of the Analysis view.
pub struct AnalysisView {
    pending: Option<Pending<AnalysisResult>>,
    result: Option<AnalysisResult>,
    error: Option<String>,

    /// Minimum confidence for a detection to be shown
    pub threshold: f32,

    /// Media selection the current result was requested for
    requested_for: Option<Option<String>>,

    texture: Option<egui::TextureHandle>,
    texture_source: Option<String>,
    image_loader: Option<Pending<LoadedImage>>,

    /// Last measured preview size
    last_frame: Option<ContainerFrame>,
}

impl AnalysisView {
    pub fn new(threshold: f32) -> Self {
        Self {
            pending: None,
            result: None,
            error: None,
            threshold,
            requested_for: None,
            texture: None,
            texture_source: None,
            image_loader: None,
            last_frame: None,
        }
    }

    /// Whether detections should be (re)fetched for the current selection.
    pub fn needs_refresh(&self, session: &MediaSession) -> bool {
        let current = session.selected_media().map(|m| m.id.clone());
        self.requested_for.as_ref() != Some(&current)
    }

    /// Forget which selection was loaded so the next frame refetches.
    pub fn invalidate(&mut self) {
        self.requested_for = None;
    }

    /// Request detections for `media`, discarding any request in flight.
    pub fn refresh(&mut self, api: Arc<dyn MediaApi>, media: Option<UploadedMedia>) {
        log::info!(
            "Loading detections for {}",
            media.as_ref().map(|m| m.name.as_str()).unwrap_or("demo media")
        );
        self.requested_for = Some(media.as_ref().map(|m| m.id.clone()));
        self.error = None;
        self.pending = Some(tasks::fetch_detections(api, media));
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some() || self.image_loader.is_some()
    }

    /// Report of what is currently shown, for export.
    pub fn report(&self, target_label: Option<&str>) -> Option<AnalysisReport> {
        let result = self.result.as_ref()?;
        Some(AnalysisReport {
            media: result.media.clone(),
            threshold: self.threshold,
            detections: visible_detections(&result.detections, self.threshold, target_label)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Show an imported report instead of fetched detections.
    pub fn load_report(&mut self, report: AnalysisReport, session: &MediaSession) {
        self.pending = None;
        self.error = None;
        self.requested_for = Some(session.selected_media().map(|m| m.id.clone()));
        self.threshold = report.threshold.clamp(0.0, 1.0);
        self.set_result(report.into_result());
    }

    fn set_result(&mut self, result: AnalysisResult) {
        let local_image = match result.media.kind {
            MediaKind::Image => result.media.local_path(),
            MediaKind::Video => None,
        };

        match local_image {
            Some(path) => {
                if self.texture_source.as_deref() != Some(result.media.url.as_str()) {
                    self.texture = None;
                    self.texture_source = Some(result.media.url.clone());
                    self.image_loader = Some(tasks::decode_image(path));
                }
            }
            None => {
                self.texture = None;
                self.texture_source = None;
                self.image_loader = None;
            }
        }

        self.result = Some(result);
    }

    /// Collect finished background work.
    pub fn poll(&mut self, ctx: &egui::Context) {
        if let Some(pending) = &self.pending {
            if let Some(result) = pending.poll() {
                self.pending = None;
                match result {
                    Ok(result) => {
                        log::info!("Loaded {} detections", result.detections.len());
                        self.set_result(result);
                    }
                    Err(e) => {
                        log::error!("Failed to load detections: {}", e);
                        self.error = Some(e);
                    }
                }
            }
        }

        if let Some(loader) = &self.image_loader {
            if let Some(result) = loader.poll() {
                self.image_loader = None;
                match result {
                    Ok(img) => {
                        let size = [img.width as usize, img.height as usize];
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                        self.texture = Some(ctx.load_texture("analysis_media", color_image, egui::TextureOptions::LINEAR));
                    }
                    Err(e) => {
                        log::error!("Failed to load preview image: {}", e);
                    }
                }
            }
        }

        if self.is_loading() {
            ctx.request_repaint();
        }
    }

    /// Display the view.
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut MediaSession, target_label: Option<&str>) {
        ui.horizontal(|ui| {
            ui.heading("Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(
                    egui::Slider::new(&mut self.threshold, 0.0..=1.0)
                        .step_by(0.05)
                        .fixed_decimals(2),
                );
                ui.label("Confidence ≥");
            });
        });
        ui.label(egui::RichText::new("Visualize detections with bounding boxes and metadata.").weak());
        ui.separator();

        if let Some(error) = &self.error {
            super::error_label(ui, error);
        }

        if self.pending.is_some() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading detections...");
            });
            return;
        }

        let Some(result) = &self.result else {
            ui.label(egui::RichText::new("No analysis loaded.").weak());
            return;
        };

        let visible = visible_detections(&result.detections, self.threshold, target_label);

        egui::SidePanel::right("detections_panel")
            .default_width(260.0)
            .show_inside(ui, |ui| {
                detection_list(ui, &visible, session);
                ui.separator();
                media_info(ui, &result.media);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            let preview = Preview {
                media: &result.media,
                texture: self.texture.as_ref(),
                loading_image: self.image_loader.is_some(),
            };
            let frame = preview.show(ui, &visible, session);
            if frame != self.last_frame {
                if let Some(f) = frame {
                    log::debug!("Preview resized to {:.0}x{:.0}", f.width, f.height);
                }
                self.last_frame = frame;
            }
        });
    }
}

/// Borrowed inputs for drawing the preview.
struct Preview<'a> {
    media: &'a MediaAsset,
    texture: Option<&'a egui::TextureHandle>,
    loading_image: bool,
}

impl Preview<'_> {
    /// Draw media and overlay; returns the measured container frame.
    fn show(&self, ui: &mut egui::Ui, visible: &[&Detection], session: &mut MediaSession) -> Option<ContainerFrame> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
        let frame = ContainerFrame::new(rect.width(), rect.height());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);

        let aspect = self.media.aspect_ratio();
        let placement = fit_contain(frame, aspect)?;

        let media_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(placement.offset_x, placement.offset_y),
            egui::vec2(placement.draw_width, placement.draw_height),
        );

        match self.texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    media_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(media_rect, 0.0, egui::Color32::from_rgb(0x2B, 0x35, 0x45));
                let text = if self.loading_image {
                    "Loading image..."
                } else {
                    match self.media.kind {
                        MediaKind::Image => "Image Placeholder",
                        MediaKind::Video => "Video Placeholder",
                    }
                };
                painter.text(
                    media_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(14.0),
                    egui::Color32::from_gray(170),
                );
            }
        }

        let boxes: Vec<NormalizedBox> = visible.iter().map(|d| d.bbox).collect();
        let projected = project(frame, aspect, &boxes);

        for (det, pb) in visible.iter().zip(&projected) {
            let selected = session.selected_detection() == Some(det.id.as_str());
            let color = if selected { SELECTED_COLOR } else { BOX_COLOR };
            let box_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(pb.left, pb.top),
                egui::vec2(pb.width, pb.height),
            );

            painter.rect_filled(box_rect, 2.0, color.gamma_multiply(0.15));
            painter.rect_stroke(box_rect, 2.0, egui::Stroke::new(if selected { 3.0 } else { 2.0 }, color));

            let galley = painter.layout_no_wrap(det.caption(), egui::FontId::proportional(12.0), egui::Color32::BLACK);
            let label_rect = egui::Rect::from_min_size(
                box_rect.left_top() - egui::vec2(0.0, galley.size().y + 4.0),
                galley.size() + egui::vec2(8.0, 4.0),
            );
            painter.rect_filled(label_rect, 3.0, color);
            painter.galley(label_rect.min + egui::vec2(4.0, 2.0), galley, egui::Color32::BLACK);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                let hit = hit_test(&projected, local.x, local.y).map(|i| visible[i].id.clone());
                if let Some(id) = &hit {
                    log::info!("Selected detection {}", id);
                }
                session.select_detection(hit);
            }
        }

        if let Some(pos) = response.hover_pos() {
            let local = pos - rect.min;
            if let Some((nx, ny)) = placement.to_normalized(local.x, local.y) {
                painter.text(
                    rect.right_bottom() - egui::vec2(6.0, 6.0),
                    egui::Align2::RIGHT_BOTTOM,
                    format!("({:.3}, {:.3})", nx, ny),
                    egui::FontId::monospace(11.0),
                    egui::Color32::from_gray(200),
                );
            }
        }

        Some(frame)
    }
}

fn detection_list(ui: &mut egui::Ui, visible: &[&Detection], session: &mut MediaSession) {
    ui.heading("Detections");
    ui.add_space(4.0);

    if visible.is_empty() {
        ui.label(egui::RichText::new("No detections at this threshold.").weak());
        return;
    }

    for det in visible {
        let selected = session.selected_detection() == Some(det.id.as_str());
        let text = format!(
            "{}  •  {:.1}%  •  {}",
            det.label,
            det.confidence * 100.0,
            det.state.label()
        );
        if ui.selectable_label(selected, text).clicked() {
            session.select_detection(if selected { None } else { Some(det.id.clone()) });
        }
    }
}

fn media_info(ui: &mut egui::Ui, media: &MediaAsset) {
    ui.label(egui::RichText::new("Media").strong());
    ui.label(egui::RichText::new(media.url.as_str()).small());
    let dims = match (media.intrinsic_width, media.intrinsic_height) {
        (Some(w), Some(h)) => format!("{} × {}", w, h),
        _ => "unknown size (assuming 16:9)".to_string(),
    };
    ui.label(egui::RichText::new(dims).small().weak());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::detection::{BehaviorState, Detection};

    fn result() -> AnalysisResult {
        let det = |id: &str, conf: f32| Detection {
            id: id.to_string(),
            label: "bear".to_string(),
            confidence: conf,
            state: BehaviorState::Moving,
            bbox: NormalizedBox { x: 0.1, y: 0.1, w: 0.1, h: 0.1 },
            timestamp_ms: 0,
        };
        AnalysisResult {
            media: MediaAsset {
                url: "demo://x".to_string(),
                kind: MediaKind::Image,
                intrinsic_width: Some(1200),
                intrinsic_height: Some(800),
            },
            detections: vec![det("1", 0.91), det("2", 0.84), det("3", 0.63)],
        }
    }

    #[test]
    fn test_report_contains_visible_detections() {
        let mut view = AnalysisView::new(0.7);
        assert!(view.report(None).is_none());

        view.set_result(result());
        let report = view.report(Some("bear")).unwrap();
        assert_eq!(report.threshold, 0.7);
        assert_eq!(report.detections.len(), 2);
        assert!(view.texture_source.is_none());
    }

    #[test]
    fn test_refresh_tracks_selection() {
        let session = MediaSession::new(5);
        let mut view = AnalysisView::new(0.7);
        assert!(view.needs_refresh(&session));

        view.load_report(
            AnalysisReport {
                media: result().media,
                threshold: 1.5,
                detections: Vec::new(),
            },
            &session,
        );
        assert!(!view.needs_refresh(&session));
        assert_eq!(view.threshold, 1.0);

        view.invalidate();
        assert!(view.needs_refresh(&session));
    }
}
