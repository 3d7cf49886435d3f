// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Import view: pick or drop a media file and upload it.

use crate::api::MediaApi;
use crate::io::media::inspect_file;
use crate::models::{
    media::{SelectedFile, UploadedMedia},
    session::MediaSession,
};
use crate::tasks::UploadTask;
use std::path::Path;
use std::sync::Arc;

const PICKER_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "mp4", "webm", "ogg", "mov", "avi", "mkv",
];

/// State of the Import view.
#[derive(Default)]
pub struct ImportView {
    selected: Option<SelectedFile>,
    upload: Option<UploadTask>,
    progress: u8,
    error: Option<String>,
}

impl ImportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload.is_some()
    }

    /// Select a picked or dropped file, replacing any previous selection.
    pub fn select_path(&mut self, path: &Path, mime: Option<&str>) {
        if self.is_uploading() {
            log::warn!("Ignoring {} while an upload is running", path.display());
            return;
        }
        self.error = None;
        match inspect_file(path, mime) {
            Ok(file) => {
                log::info!("Selected {}", file.info());
                self.selected = Some(file);
                self.progress = 0;
            }
            Err(e) => {
                log::error!("Cannot import {}: {:#}", path.display(), e);
                self.selected = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Open a native file picker.
    pub fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images and videos", PICKER_EXTENSIONS)
            .pick_file()
        {
            self.select_path(&path, None);
        }
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.upload = None;
        self.progress = 0;
        self.error = None;
    }

    /// Start uploading the selected file. No-op if nothing is selected or an
    /// upload is already running.
    pub fn start_upload(&mut self, api: Arc<dyn MediaApi>) {
        if self.upload.is_some() {
            return;
        }
        if let Some(file) = &self.selected {
            log::info!("Uploading {}", file.name);
            self.error = None;
            self.progress = 0;
            self.upload = Some(UploadTask::spawn(api, file.clone()));
        }
    }

    /// Collect upload progress. Returns the metadata once an upload
    /// completes; it has already been added to `session`.
    pub fn poll(&mut self, ctx: &egui::Context, session: &mut MediaSession) -> Option<UploadedMedia> {
        let task = self.upload.as_mut()?;
        self.progress = task.progress();

        let result = task.poll();
        let Some(result) = result else {
            ctx.request_repaint();
            return None;
        };

        self.upload = None;
        match result {
            Ok(meta) => {
                log::info!("Uploaded {} as {}", meta.name, meta.id);
                self.progress = 100;
                session.add_uploaded(meta.clone());
                Some(meta)
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                self.error = Some(e);
                None
            }
        }
    }

    /// Display the view.
    pub fn show(&mut self, ui: &mut egui::Ui, api: &Arc<dyn MediaApi>, session: &mut MediaSession) {
        let (hovering, dropped) = ui.ctx().input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));
        if let Some(file) = dropped.first() {
            match &file.path {
                Some(path) => self.select_path(path, Some(file.mime.as_str())),
                None => self.error = Some("Dropped item has no file path.".to_string()),
            }
        }

        ui.heading("Import Media");
        ui.label(egui::RichText::new("Upload an image or video to analyze.").weak());
        ui.separator();

        self.drop_zone(ui, hovering);
        ui.add_space(12.0);

        if let Some(error) = &self.error {
            super::error_label(ui, error);
        }

        if let Some(file) = &self.selected {
            ui.label(file.info());
            ui.horizontal(|ui| {
                let uploading = self.upload.is_some();
                let label = if uploading { "Uploading..." } else { "Upload" };
                if ui.add_enabled(!uploading, egui::Button::new(label)).clicked() {
                    self.start_upload(api.clone());
                }
                if ui.add_enabled(!uploading, egui::Button::new("Reset")).clicked() {
                    self.reset();
                }
            });
        }

        if self.upload.is_some() || self.progress == 100 {
            ui.add(
                egui::ProgressBar::new(self.progress as f32 / 100.0)
                    .show_percentage()
                    .animate(self.upload.is_some()),
            );
        }

        ui.add_space(16.0);
        uploads_list(ui, session);
    }

    fn drop_zone(&mut self, ui: &mut egui::Ui, hovering: bool) {
        let stroke_color = if hovering {
            ui.visuals().selection.stroke.color
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Drag & drop your video or image here").strong());
                    ui.label(egui::RichText::new("Supported: .mp4, .mov, .jpg, .png and more").small().weak());
                    ui.add_space(8.0);
                    let enabled = self.upload.is_none();
                    if ui.add_enabled(enabled, egui::Button::new("Browse Files")).clicked() {
                        self.pick_file();
                    }
                });
            });
    }
}

fn uploads_list(ui: &mut egui::Ui, session: &mut MediaSession) {
    ui.label(egui::RichText::new("Recent uploads").strong());

    if session.uploaded().is_empty() {
        ui.label(egui::RichText::new("No uploads yet.").weak());
        return;
    }

    let selected_id = session.selected_media().map(|m| m.id.clone());
    let mut clicked = None;

    egui::Grid::new("uploads_grid")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui| {
            for media in session.uploaded() {
                let is_selected = selected_id.as_deref() == Some(media.id.as_str());
                if ui.selectable_label(is_selected, media.name.as_str()).clicked() {
                    clicked = Some(media.id.clone());
                }
                ui.label(media.kind.mime_prefix());
                ui.label(format!("{} KB", (media.size as f64 / 1024.0).round()));
                ui.label(
                    media
                        .uploaded_at
                        .with_timezone(&chrono::Local)
                        .format("%H:%M:%S")
                        .to_string(),
                );
                ui.end_row();
            }
        });

    if let Some(id) = clicked {
        log::info!("Selected media {}", id);
        session.select_media(&id);
    }
}
