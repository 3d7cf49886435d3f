// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dashboard view: summary cards, activity trends and ethogram.

use super::charts::{self, ActivityVariant};
use crate::api::MediaApi;
use crate::models::dashboard::DashboardData;
use crate::tasks::{self, Pending};
use std::sync::Arc;

/// State of the Dashboard view.
#[derive(Default)]
pub struct DashboardView {
    pending: Option<Pending<DashboardData>>,
    data: Option<DashboardData>,
    error: Option<String>,
    stale: bool,
    variant: ActivityVariant,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            stale: true,
            ..Default::default()
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn refresh(&mut self, api: Arc<dyn MediaApi>) {
        log::info!("Loading dashboard");
        self.stale = false;
        self.error = None;
        self.pending = Some(tasks::fetch_dashboard(api));
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending else {
            return;
        };
        match pending.poll() {
            Some(Ok(data)) => {
                log::info!("Dashboard loaded: {} time buckets", data.time_series.len());
                self.pending = None;
                self.data = Some(data);
            }
            Some(Err(e)) => {
                log::error!("Failed to load dashboard: {}", e);
                self.pending = None;
                self.error = Some(e);
            }
            None => ctx.request_repaint(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Dashboard");
        ui.label(egui::RichText::new("Activity trends across recent observations.").weak());
        ui.separator();

        if let Some(error) = &self.error {
            super::error_label(ui, error);
        }

        if self.pending.is_some() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading dashboard...");
            });
            return;
        }

        let Some(data) = &self.data else {
            return;
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(4, |cols| {
                stat_card(&mut cols[0], "Total Detections", data.totals.total(), "Last 8 hours");
                stat_card(&mut cols[1], "Resting", data.totals.resting, "Sum of hourly counts");
                stat_card(&mut cols[2], "Moving", data.totals.moving, "Sum of hourly counts");
                stat_card(&mut cols[3], "Peak Hour", data.peak_count(), "Detections in busiest hour");
            });
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Activity Over Time").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        for variant in ActivityVariant::ALL.iter().rev() {
                            ui.selectable_value(&mut self.variant, *variant, variant.label());
                        }
                    });
                });
                charts::activity_chart(ui, &data.time_series, self.variant, 240.0);
            });
            ui.add_space(12.0);

            ui.columns(2, |cols| {
                cols[0].group(|ui| {
                    ui.label(egui::RichText::new("Resting vs Moving").strong());
                    charts::rest_move_chart(ui, &data.rest_move_data(), 220.0);
                });
                cols[1].group(|ui| {
                    ui.label(egui::RichText::new("Ethogram").strong());
                    charts::ethogram_timeline(ui, &data.ethogram, 28.0);
                    charts::legend(ui);
                });
            });
        });
    }
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: u32, hint: &str) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new(title).small().weak());
        ui.label(egui::RichText::new(value.to_string()).size(24.0).strong());
        ui.label(egui::RichText::new(hint).small().weak());
    });
}
