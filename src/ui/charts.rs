// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Painter-drawn charts for the dashboard.
//!
//! Activity over time (line, bar or stacked combo), resting vs. moving
//! totals and an ethogram timeline.

use crate::models::{
    dashboard::{Ethogram, TimeSeriesPoint},
    detection::BehaviorState,
};

pub const RESTING_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1E, 0x3A, 0x8A);
pub const MOVING_COLOR: egui::Color32 = egui::Color32::from_rgb(0xF5, 0x9E, 0x0B);
const TOTAL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x41, 0x55);

const Y_AXIS_WIDTH: f32 = 32.0;
const X_AXIS_HEIGHT: f32 = 20.0;

/// How the activity chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityVariant {
    #[default]
    Line,
    Bar,
    Combo,
}

impl ActivityVariant {
    pub const ALL: [ActivityVariant; 3] = [ActivityVariant::Line, ActivityVariant::Bar, ActivityVariant::Combo];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityVariant::Line => "Line",
            ActivityVariant::Bar => "Bar",
            ActivityVariant::Combo => "Combo",
        }
    }
}

pub fn state_color(state: BehaviorState) -> egui::Color32 {
    match state {
        BehaviorState::Resting => RESTING_COLOR,
        BehaviorState::Moving => MOVING_COLOR,
    }
}

/// Round an axis maximum up to a multiple of 5 (at least 1).
fn axis_max(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        value.div_ceil(5) * 5
    }
}

/// Plot area inside `rect` after reserving space for axis labels.
fn plot_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        rect.min + egui::vec2(Y_AXIS_WIDTH, 8.0),
        rect.max - egui::vec2(8.0, X_AXIS_HEIGHT),
    )
}

fn draw_y_axis(painter: &egui::Painter, plot: egui::Rect, max: u32, text_color: egui::Color32) {
    let grid = egui::Stroke::new(1.0, text_color.gamma_multiply(0.2));
    for k in 0..=4 {
        let frac = k as f32 / 4.0;
        let y = plot.bottom() - frac * plot.height();
        painter.line_segment([egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)], grid);
        painter.text(
            egui::pos2(plot.left() - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{:.0}", frac * max as f32),
            egui::FontId::proportional(10.0),
            text_color,
        );
    }
}

/// Activity counts over time.
pub fn activity_chart(ui: &mut egui::Ui, series: &[TimeSeriesPoint], variant: ActivityVariant, height: f32) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    if series.is_empty() {
        painter.text(rect.center(), egui::Align2::CENTER_CENTER, "No data", egui::FontId::proportional(12.0), text_color);
        return;
    }

    let plot = plot_rect(rect);
    let max = axis_max(series.iter().map(|p| p.count).max().unwrap_or(0));
    draw_y_axis(&painter, plot, max, text_color);

    let slot = plot.width() / series.len() as f32;
    let x_center = |i: usize| plot.left() + slot * (i as f32 + 0.5);
    let y_of = |v: u32| plot.bottom() - v as f32 / max as f32 * plot.height();
    let bar_half = (slot * 0.3).max(1.0);

    match variant {
        ActivityVariant::Line => {
            draw_polyline(&painter, series, x_center, y_of, egui::Stroke::new(2.0, MOVING_COLOR));
        }
        ActivityVariant::Bar => {
            for (i, p) in series.iter().enumerate() {
                let bar = egui::Rect::from_min_max(
                    egui::pos2(x_center(i) - bar_half, y_of(p.count)),
                    egui::pos2(x_center(i) + bar_half, plot.bottom()),
                );
                painter.rect_filled(bar, 3.0, RESTING_COLOR);
            }
        }
        ActivityVariant::Combo => {
            for (i, p) in series.iter().enumerate() {
                let resting_top = y_of(p.resting);
                let resting = egui::Rect::from_min_max(
                    egui::pos2(x_center(i) - bar_half, resting_top),
                    egui::pos2(x_center(i) + bar_half, plot.bottom()),
                );
                let moving = egui::Rect::from_min_max(
                    egui::pos2(x_center(i) - bar_half, y_of(p.resting + p.moving)),
                    egui::pos2(x_center(i) + bar_half, resting_top),
                );
                painter.rect_filled(resting, 0.0, RESTING_COLOR);
                painter.rect_filled(moving, 0.0, MOVING_COLOR);
            }
            draw_polyline(&painter, series, x_center, y_of, egui::Stroke::new(2.0, TOTAL_COLOR));
        }
    }

    for (i, p) in series.iter().enumerate() {
        painter.text(
            egui::pos2(x_center(i), plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &p.time,
            egui::FontId::proportional(10.0),
            text_color,
        );
    }

    if let Some(pos) = response.hover_pos() {
        if plot.x_range().contains(pos.x) {
            let i = (((pos.x - plot.left()) / slot) as usize).min(series.len() - 1);
            let p = &series[i];
            response.on_hover_text_at_pointer(format!(
                "{}\nResting: {}\nMoving: {}\nTotal: {}",
                p.time, p.resting, p.moving, p.count
            ));
        }
    }
}

fn draw_polyline(
    painter: &egui::Painter,
    series: &[TimeSeriesPoint],
    x_center: impl Fn(usize) -> f32,
    y_of: impl Fn(u32) -> f32,
    stroke: egui::Stroke,
) {
    let points: Vec<egui::Pos2> = series
        .iter()
        .enumerate()
        .map(|(i, p)| egui::pos2(x_center(i), y_of(p.count)))
        .collect();
    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke);
    }
    for point in &points {
        painter.circle_filled(*point, 2.5, stroke.color);
    }
}

/// Two bars: resting and moving totals.
pub fn rest_move_chart(ui: &mut egui::Ui, data: &[(BehaviorState, u32)], height: f32) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let plot = plot_rect(rect);
    let max = axis_max(data.iter().map(|(_, v)| *v).max().unwrap_or(0));
    draw_y_axis(&painter, plot, max, text_color);

    if data.is_empty() {
        return;
    }

    let slot = plot.width() / data.len() as f32;
    let mut hovered = None;
    for (i, (state, value)) in data.iter().enumerate() {
        let center = plot.left() + slot * (i as f32 + 0.5);
        let top = plot.bottom() - *value as f32 / max as f32 * plot.height();
        let bar = egui::Rect::from_min_max(
            egui::pos2(center - slot * 0.25, top),
            egui::pos2(center + slot * 0.25, plot.bottom()),
        );
        painter.rect_filled(bar, 6.0, state_color(*state));
        painter.text(
            egui::pos2(center, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            state.label(),
            egui::FontId::proportional(11.0),
            text_color,
        );
        if response.hover_pos().is_some_and(|p| bar.contains(p)) {
            hovered = Some((*state, *value));
        }
    }

    if let Some((state, value)) = hovered {
        response.on_hover_text_at_pointer(format!("{}: {}", state.label(), value));
    }
}

/// One row per subject; segments positioned at their start offsets.
pub fn ethogram_timeline(ui: &mut egui::Ui, ethogram: &Ethogram, row_height: f32) {
    const LABEL_WIDTH: f32 = 70.0;

    let rows = ethogram.subjects.len().max(1);
    let height = rows as f32 * (row_height + 8.0) + X_AXIS_HEIGHT;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let Some((min, max)) = ethogram.domain() else {
        painter.text(rect.center(), egui::Align2::CENTER_CENTER, "No segments", egui::FontId::proportional(12.0), text_color);
        return;
    };

    let track = egui::Rect::from_min_max(
        rect.min + egui::vec2(LABEL_WIDTH, 0.0),
        rect.max - egui::vec2(8.0, X_AXIS_HEIGHT),
    );
    let row_top = |row: usize| track.top() + row as f32 * (row_height + 8.0) + 4.0;

    for (row, subject) in ethogram.subjects.iter().enumerate() {
        painter.text(
            egui::pos2(rect.left() + 4.0, row_top(row) + row_height / 2.0),
            egui::Align2::LEFT_CENTER,
            subject,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }

    let mut hovered = None;
    for span in ethogram.layout() {
        let seg_rect = egui::Rect::from_min_max(
            egui::pos2(track.left() + span.start_frac * track.width(), row_top(span.row)),
            egui::pos2(track.left() + span.end_frac * track.width(), row_top(span.row) + row_height),
        );
        painter.rect_filled(seg_rect, 4.0, state_color(span.state));
        if response.hover_pos().is_some_and(|p| seg_rect.contains(p)) {
            hovered = Some(span.segment);
        }
    }

    for k in 0..=5 {
        let frac = k as f32 / 5.0;
        let x = track.left() + frac * track.width();
        painter.text(
            egui::pos2(x, track.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            format!("{:.0}", min + frac * (max - min)),
            egui::FontId::proportional(10.0),
            text_color,
        );
    }

    if let Some(seg) = hovered.and_then(|i| ethogram.segments.get(i)) {
        response.on_hover_text_at_pointer(format!(
            "{}\nState: {}\nStart: {} • Duration: {}",
            seg.subject,
            seg.state.label(),
            seg.start,
            seg.duration()
        ));
    }
}

/// Color key for behavior states.
pub fn legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for state in [BehaviorState::Resting, BehaviorState::Moving] {
            ui.colored_label(state_color(state), "■");
            ui.label(state.label());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max_rounds_up() {
        assert_eq!(axis_max(0), 1);
        assert_eq!(axis_max(1), 5);
        assert_eq!(axis_max(5), 5);
        assert_eq!(axis_max(13), 15);
    }
}
