// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Wildlife Monitor application.

pub mod analysis;
pub mod charts;
pub mod dashboard;
pub mod import;
pub mod sidebar;

use crate::config::Theme;

/// Switch egui's visuals to match `theme`.
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
}

/// Red inline error text.
pub fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(ui.visuals().error_fg_color, message);
}
