// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dashboard aggregates: activity time series, totals and ethogram.

use super::detection::BehaviorState;
use serde::{Deserialize, Serialize};

/// Activity counts for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: String,
    pub resting: u32,
    pub moving: u32,
    pub count: u32,
}

/// Summed counts per behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub resting: u32,
    pub moving: u32,
}

impl Totals {
    pub fn from_series(series: &[TimeSeriesPoint]) -> Self {
        series.iter().fold(Totals::default(), |acc, p| Totals {
            resting: acc.resting + p.resting,
            moving: acc.moving + p.moving,
        })
    }

    pub fn total(&self) -> u32 {
        self.resting + self.moving
    }
}

/// One behavior bout for a subject, in timeline units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthogramSegment {
    pub subject: String,
    pub start: f32,
    pub end: f32,
    pub state: BehaviorState,
}

impl EthogramSegment {
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ethogram {
    pub subjects: Vec<String>,
    pub segments: Vec<EthogramSegment>,
}

/// Horizontal placement of a segment as fractions of the timeline width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpan {
    /// Index into `Ethogram::segments`.
    pub segment: usize,
    pub row: usize,
    pub start_frac: f32,
    pub end_frac: f32,
    pub state: BehaviorState,
}

impl Ethogram {
    /// `(min start, max end)` over all segments.
    pub fn domain(&self) -> Option<(f32, f32)> {
        let min = self.segments.iter().map(|s| s.start).reduce(f32::min)?;
        let max = self.segments.iter().map(|s| s.end).reduce(f32::max)?;
        Some((min, max))
    }

    /// Lay segments out at their real start offsets within the domain.
    ///
    /// Segments whose subject is not listed are skipped.
    pub fn layout(&self) -> Vec<SegmentSpan> {
        let Some((min, max)) = self.domain() else {
            return Vec::new();
        };
        let span = max - min;
        if span <= 0.0 {
            return Vec::new();
        }

        self.segments
            .iter()
            .enumerate()
            .filter_map(|(segment, seg)| {
                let row = self.subjects.iter().position(|s| *s == seg.subject)?;
                Some(SegmentSpan {
                    segment,
                    row,
                    start_frac: (seg.start - min) / span,
                    end_frac: (seg.end - min) / span,
                    state: seg.state,
                })
            })
            .collect()
    }
}

/// Everything the Dashboard view renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub time_series: Vec<TimeSeriesPoint>,
    pub totals: Totals,
    pub ethogram: Ethogram,
}

impl DashboardData {
    /// Bars for the resting-vs-moving chart.
    pub fn rest_move_data(&self) -> [(BehaviorState, u32); 2] {
        [
            (BehaviorState::Resting, self.totals.resting),
            (BehaviorState::Moving, self.totals.moving),
        ]
    }

    /// Largest bucket count, for scaling chart axes.
    pub fn peak_count(&self) -> u32 {
        self.time_series.iter().map(|p| p.count).max().unwrap_or(0)
    }
}
