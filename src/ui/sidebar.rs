// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sidebar navigation.
//!
//! This module provides the left-hand navigation between the Import,
//! Analysis and Dashboard views.

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Import,
    Analysis,
    Dashboard,
}

impl View {
    pub const ALL: [View; 3] = [View::Import, View::Analysis, View::Dashboard];

    pub fn label(&self) -> &'static str {
        match self {
            View::Import => "⬆ Import Media",
            View::Analysis => "🔍 Analysis",
            View::Dashboard => "📊 Dashboard",
        }
    }
}

/// Display the sidebar. Returns the view the user clicked, if it changed.
pub fn show(ui: &mut egui::Ui, current: View) -> Option<View> {
    let mut picked = None;

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("WM")
                .strong()
                .background_color(egui::Color32::from_rgb(0x1E, 0x3A, 0x8A))
                .color(egui::Color32::WHITE),
        );
        ui.vertical(|ui| {
            ui.label(egui::RichText::new("Wildlife Monitor").strong());
            ui.label(egui::RichText::new("Corporate Navy").small().weak());
        });
    });
    ui.separator();

    ui.spacing_mut().item_spacing.y = 6.0;
    for view in View::ALL {
        let response = ui.add_sized(
            [ui.available_width(), 28.0],
            egui::SelectableLabel::new(current == view, view.label()),
        );
        if response.clicked() && current != view {
            picked = Some(view);
        }
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("• View trends in Dashboard").small().weak());
        ui.label(egui::RichText::new("• Overlay detections in Analysis").small().weak());
        ui.label(egui::RichText::new("• Upload files in Import").small().weak());
        ui.label(egui::RichText::new("Hints").small().strong());
    });

    picked
}
