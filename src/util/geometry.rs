// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps normalized detection boxes onto a media element that is
//! drawn "contain"-fit (letterboxed) inside a container, and converts
//! container pixels back to normalized coordinates for pointer handling.

use crate::models::detection::NormalizedBox;

/// Pixel size of the area the media is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerFrame {
    pub width: f32,
    pub height: f32,
}

impl ContainerFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A frame is usable only when both sides are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A detection box in container pixels, relative to the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ProjectedBox {
    /// Check whether a container-space point falls inside this box.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Where the media lands inside the container after contain-fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset_x: f32,
    pub offset_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
}

impl Placement {
    /// Map a normalized box into container pixels.
    pub fn project_box(&self, b: &NormalizedBox) -> ProjectedBox {
        ProjectedBox {
            left: self.offset_x + b.x * self.draw_width,
            top: self.offset_y + b.y * self.draw_height,
            width: b.w * self.draw_width,
            height: b.h * self.draw_height,
        }
    }

    /// Convert container pixel coordinates to normalized media coordinates.
    ///
    /// Returns `None` when the point lies in the letterbox bars.
    pub fn to_normalized(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.draw_width <= 0.0 || self.draw_height <= 0.0 {
            return None;
        }
        let nx = (x - self.offset_x) / self.draw_width;
        let ny = (y - self.offset_y) / self.draw_height;
        if (0.0..=1.0).contains(&nx) && (0.0..=1.0).contains(&ny) {
            Some((nx, ny))
        } else {
            None
        }
    }
}

/// Compute the letterboxed placement of media with `media_aspect`
/// (width / height) inside `frame`.
///
/// Returns `None` for an unusable frame or aspect ratio; layout passes can
/// transiently report a zero-sized container.
pub fn fit_contain(frame: ContainerFrame, media_aspect: f32) -> Option<Placement> {
    if !frame.is_valid() || !media_aspect.is_finite() || media_aspect <= 0.0 {
        return None;
    }

    let container_aspect = frame.width / frame.height;

    if media_aspect == container_aspect {
        // Both branches agree mathematically; pin the result so float
        // rounding cannot introduce a sub-pixel offset.
        return Some(Placement {
            offset_x: 0.0,
            offset_y: 0.0,
            draw_width: frame.width,
            draw_height: frame.height,
        });
    }

    let placement = if media_aspect > container_aspect {
        // Media is wider - fit to width
        let draw_width = frame.width;
        let draw_height = draw_width / media_aspect;
        Placement {
            offset_x: 0.0,
            offset_y: (frame.height - draw_height) / 2.0,
            draw_width,
            draw_height,
        }
    } else {
        // Media is taller - fit to height
        let draw_height = frame.height;
        let draw_width = draw_height * media_aspect;
        Placement {
            offset_x: (frame.width - draw_width) / 2.0,
            offset_y: 0.0,
            draw_width,
            draw_height,
        }
    };

    Some(placement)
}

/// Project normalized boxes onto a contain-fit media element.
///
/// One output per input, in input order. Box coordinates are not clamped.
/// An unusable frame or aspect ratio yields an empty list.
pub fn project(frame: ContainerFrame, media_aspect: f32, boxes: &[NormalizedBox]) -> Vec<ProjectedBox> {
    match fit_contain(frame, media_aspect) {
        Some(placement) => boxes.iter().map(|b| placement.project_box(b)).collect(),
        None => Vec::new(),
    }
}

/// Index of the topmost box containing the point. Later boxes are drawn on
/// top, so they win.
pub fn hit_test(boxes: &[ProjectedBox], x: f32, y: f32) -> Option<usize> {
    boxes.iter().rposition(|b| b.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn nb(x: f32, y: f32, w: f32, h: f32) -> NormalizedBox {
        NormalizedBox { x, y, w, h }
    }

    #[test]
    fn test_project_matching_aspect() {
        let frame = ContainerFrame::new(800.0, 450.0);
        let out = project(frame, 16.0 / 9.0, &[nb(0.5, 0.5, 0.1, 0.1)]);

        assert_eq!(out.len(), 1);
        assert!((out[0].left - 400.0).abs() < EPS);
        assert!((out[0].top - 225.0).abs() < EPS);
        assert!((out[0].width - 80.0).abs() < EPS);
        assert!((out[0].height - 45.0).abs() < EPS);
    }

    #[test]
    fn test_project_wide_media_in_square() {
        let frame = ContainerFrame::new(400.0, 400.0);
        let placement = fit_contain(frame, 16.0 / 9.0).unwrap();
        assert_eq!(placement.offset_x, 0.0);
        assert!((placement.offset_y - 87.5).abs() < EPS);
        assert!((placement.draw_width - 400.0).abs() < EPS);
        assert!((placement.draw_height - 225.0).abs() < EPS);

        let out = project(frame, 16.0 / 9.0, &[nb(0.0, 0.0, 1.0, 1.0)]);
        assert!((out[0].left - 0.0).abs() < EPS);
        assert!((out[0].top - 87.5).abs() < EPS);
        assert!((out[0].width - 400.0).abs() < EPS);
        assert!((out[0].height - 225.0).abs() < EPS);
    }

    #[test]
    fn test_project_tall_media_pillarboxed() {
        // 3:4 portrait image in a 16:9 container
        let frame = ContainerFrame::new(1600.0, 900.0);
        let placement = fit_contain(frame, 0.75).unwrap();
        assert_eq!(placement.offset_y, 0.0);
        assert!((placement.draw_height - 900.0).abs() < EPS);
        assert!((placement.draw_width - 675.0).abs() < EPS);
        assert!((placement.offset_x - 462.5).abs() < EPS);
    }

    #[test]
    fn test_equal_aspect_has_zero_offsets() {
        for (w, h) in [(800.0, 450.0), (1920.0, 1080.0), (333.0, 187.3125), (3.0, 7.0)] {
            let frame = ContainerFrame::new(w, h);
            let p = fit_contain(frame, w / h).unwrap();
            assert_eq!(p.offset_x, 0.0);
            assert_eq!(p.offset_y, 0.0);
            assert_eq!(p.draw_width, w);
            assert_eq!(p.draw_height, h);
        }
    }

    #[test]
    fn test_degenerate_frames_yield_empty() {
        let boxes = [nb(0.1, 0.1, 0.2, 0.2)];
        assert!(project(ContainerFrame::new(0.0, 450.0), 1.5, &boxes).is_empty());
        assert!(project(ContainerFrame::new(800.0, 0.0), 1.5, &boxes).is_empty());
        assert!(project(ContainerFrame::new(-5.0, 10.0), 1.5, &boxes).is_empty());
        assert!(project(ContainerFrame::new(f32::NAN, 10.0), 1.5, &boxes).is_empty());
        assert!(project(ContainerFrame::new(f32::INFINITY, 10.0), 1.5, &boxes).is_empty());
        assert!(project(ContainerFrame::new(800.0, 450.0), 0.0, &boxes).is_empty());
        assert!(project(ContainerFrame::new(800.0, 450.0), f32::NAN, &boxes).is_empty());
    }

    #[test]
    fn test_one_output_per_input_in_order() {
        let frame = ContainerFrame::new(640.0, 480.0);
        let boxes = [nb(0.1, 0.0, 0.1, 0.1), nb(0.5, 0.0, 0.1, 0.1), nb(0.9, 0.0, 0.1, 0.1)];
        let out = project(frame, 4.0 / 3.0, &boxes);
        assert_eq!(out.len(), 3);
        assert!(out[0].left < out[1].left && out[1].left < out[2].left);
        assert!(project(frame, 4.0 / 3.0, &[]).is_empty());
    }

    #[test]
    fn test_out_of_range_boxes_propagate() {
        let frame = ContainerFrame::new(100.0, 100.0);
        let out = project(frame, 1.0, &[nb(-0.5, 1.5, 2.0, 0.5)]);
        assert!((out[0].left + 50.0).abs() < EPS);
        assert!((out[0].top - 150.0).abs() < EPS);
        assert!((out[0].width - 200.0).abs() < EPS);
    }

    #[test]
    fn test_projected_boxes_stay_inside_drawn_media() {
        let frames = [(800.0, 450.0), (400.0, 400.0), (300.0, 900.0), (1234.5, 77.25)];
        let aspects = [16.0 / 9.0, 4.0 / 3.0, 1.0, 0.5625, 3.0];
        let boxes = [
            nb(0.0, 0.0, 1.0, 1.0),
            nb(0.12, 0.22, 0.22, 0.18),
            nb(0.55, 0.3, 0.27, 0.35),
            nb(0.9, 0.9, 0.1, 0.1),
        ];

        for (w, h) in frames {
            for aspect in aspects {
                let frame = ContainerFrame::new(w, h);
                let p = fit_contain(frame, aspect).unwrap();
                let eps = 0.001 * w.max(h);
                for b in project(frame, aspect, &boxes) {
                    assert!(b.left >= p.offset_x - eps);
                    assert!(b.left + b.width <= p.offset_x + p.draw_width + eps);
                    assert!(b.top >= p.offset_y - eps);
                    assert!(b.top + b.height <= p.offset_y + p.draw_height + eps);
                }
            }
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let frame = ContainerFrame::new(713.0, 401.0);
        let boxes = [nb(0.12, 0.22, 0.22, 0.18), nb(0.4, 0.62, 0.16, 0.14)];
        let a = project(frame, 1.5, &boxes);
        let b = project(frame, 1.5, &boxes);
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_normalized_inverts_projection() {
        let frame = ContainerFrame::new(400.0, 400.0);
        let p = fit_contain(frame, 16.0 / 9.0).unwrap();

        let (nx, ny) = p.to_normalized(200.0, 200.0).unwrap();
        assert!((nx - 0.5).abs() < EPS);
        assert!((ny - 0.5).abs() < EPS);

        // Inside the top letterbox bar
        assert!(p.to_normalized(200.0, 10.0).is_none());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let boxes = [
            ProjectedBox { left: 0.0, top: 0.0, width: 100.0, height: 100.0 },
            ProjectedBox { left: 50.0, top: 50.0, width: 100.0, height: 100.0 },
        ];
        assert_eq!(hit_test(&boxes, 75.0, 75.0), Some(1));
        assert_eq!(hit_test(&boxes, 10.0, 10.0), Some(0));
        assert_eq!(hit_test(&boxes, 300.0, 300.0), None);
    }
}
