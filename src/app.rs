// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the application shell: menu bar, header with API
//! mode and theme controls, sidebar navigation and the three views. It owns
//! the session state and hands it to whichever view is active.

use crate::api::{get_api, ApiMode, MediaApi};
use crate::config::Settings;
use crate::io::serialization::{export_report, import_report};
use crate::models::session::MediaSession;
use crate::ui::{
    analysis::AnalysisView,
    apply_theme,
    dashboard::DashboardView,
    import::ImportView,
    sidebar::{self, View},
};
use chrono::Datelike;
use std::path::PathBuf;
use std::sync::Arc;

/// Main application state.
pub struct WildwatchApp {
    settings: Settings,

    /// Backend selected in the header
    api_mode: ApiMode,
    api: Arc<dyn MediaApi>,

    /// Currently displayed view
    view: View,

    /// Uploads and selections shared between views
    session: MediaSession,

    import: ImportView,
    analysis: AnalysisView,
    dashboard: DashboardView,

    /// Last export/import outcome shown in the footer
    status: Option<String>,
}

impl WildwatchApp {
    /// Create a new application instance from loaded settings.
    pub fn new(ctx: &egui::Context, settings: Settings) -> Self {
        apply_theme(ctx, settings.theme);
        let api_mode = settings.api_mode;
        Self {
            api: get_api(api_mode, &settings),
            api_mode,
            view: View::Import,
            session: MediaSession::new(settings.max_uploads),
            import: ImportView::new(),
            analysis: AnalysisView::new(settings.confidence_threshold),
            dashboard: DashboardView::new(),
            status: None,
            settings,
        }
    }

    fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }
        log::info!("Switching to {:?}", view);
        self.view = view;
        // Views refetch on entry
        match view {
            View::Analysis => self.analysis.invalidate(),
            View::Dashboard => self.dashboard.invalidate(),
            View::Import => {}
        }
    }

    fn set_api_mode(&mut self, mode: ApiMode) {
        if mode == self.api_mode {
            return;
        }
        log::info!("API mode changed to {}", mode.label());
        self.api_mode = mode;
        self.api = get_api(mode, &self.settings);
        self.analysis.invalidate();
        self.dashboard.invalidate();
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = self.settings.theme.toggled();
        apply_theme(ctx, self.settings.theme);
    }

    /// Export the current analysis to a file.
    fn export_analysis(&mut self, path: PathBuf) {
        let Some(report) = self.analysis.report(self.settings.target_label.as_deref()) else {
            self.status = Some("Nothing to export yet".to_string());
            return;
        };

        match export_report(&report, &path) {
            Ok(()) => {
                log::info!("Exported analysis to {}", path.display());
                self.status = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export analysis: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Load a previously exported analysis and show it.
    fn import_analysis(&mut self, path: PathBuf) {
        match import_report(&path) {
            Ok(report) => {
                log::info!(
                    "Imported {} detections from {}",
                    report.detections.len(),
                    path.display()
                );
                self.navigate(View::Analysis);
                self.analysis.load_report(report, &self.session);
                self.status = Some(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to import analysis: {:#}", e);
                self.status = Some(format!("Import failed: {}", e));
            }
        }
    }

    /// Kick off fetches the active view is waiting on.
    fn refresh_active_view(&mut self) {
        match self.view {
            View::Analysis if self.analysis.needs_refresh(&self.session) => {
                let media = self.session.selected_media().cloned();
                self.analysis.refresh(self.api.clone(), media);
            }
            View::Dashboard if self.dashboard.needs_refresh() => {
                self.dashboard.refresh(self.api.clone());
            }
            _ => {}
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Media...").clicked() {
                        self.navigate(View::Import);
                        self.import.pick_file();
                        ui.close_menu();
                    }
                    if ui.button("Load Analysis...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Analysis", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_analysis(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Analysis", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("analysis.yaml")
                                .save_file()
                            {
                                self.export_analysis(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("analysis.json")
                                .save_file()
                            {
                                self.export_analysis(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    for view in View::ALL {
                        if ui.button(view.label()).clicked() {
                            self.navigate(view);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Toggle Theme").clicked() {
                        self.toggle_theme(ctx);
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Wildlife Monitoring");
                ui.label(egui::RichText::new("Corporate Navy").small().weak());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.settings.theme {
                        crate::config::Theme::Light => "🌙 Dark",
                        crate::config::Theme::Dark => "☀ Light",
                    };
                    if ui.button(theme_label).clicked() {
                        self.toggle_theme(ctx);
                    }

                    let mut mode = self.api_mode;
                    egui::ComboBox::from_id_source("api_mode")
                        .selected_text(mode.label())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut mode, ApiMode::Mock, ApiMode::Mock.label());
                            ui.selectable_value(&mut mode, ApiMode::Real, ApiMode::Real.label());
                        });
                    ui.label("API:");
                    self.set_api_mode(mode);
                });
            });
        });
    }

    fn footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "© {} Wildlife Monitoring • egui scaffold",
                        chrono::Local::now().year()
                    ))
                    .small()
                    .weak(),
                );
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(status).small());
                }
            });
        });
    }
}

impl eframe::App for WildwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect finished background work
        if self.import.poll(ctx, &mut self.session).is_some() {
            // A new first upload changes the selection; analysis follows it
            self.analysis.invalidate();
        }
        self.analysis.poll(ctx);
        self.dashboard.poll(ctx);

        self.menu_bar(ctx);
        self.header(ctx);
        self.footer(ctx);

        let picked = egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| sidebar::show(ui, self.view))
            .inner;
        if let Some(view) = picked {
            self.navigate(view);
        }

        self.refresh_active_view();

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Import => self.import.show(ui, &self.api, &mut self.session),
            View::Analysis => {
                let target_label = self.settings.target_label.as_deref();
                self.analysis.show(ui, &mut self.session, target_label);
            }
            View::Dashboard => self.dashboard.show(ui),
        });
    }
}
