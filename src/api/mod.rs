// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data access layer.
//!
//! Views talk to a [`MediaApi`] and never care whether it is the simulated
//! backend or a real one. [`get_api`] picks the implementation for the
//! current [`ApiMode`].

pub mod mock;
pub mod real;

use crate::config::Settings;
use crate::models::{
    dashboard::DashboardData,
    detection::AnalysisResult,
    media::{SelectedFile, UploadedMedia},
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which backend serves data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Mock,
    Real,
}

impl ApiMode {
    pub fn label(&self) -> &'static str {
        match self {
            ApiMode::Mock => "Mock",
            ApiMode::Real => "Real",
        }
    }
}

/// Upload, detection and dashboard endpoints.
///
/// Calls block; the UI runs them on worker threads.
pub trait MediaApi: Send + Sync {
    /// Upload a file, reporting progress in percent.
    fn upload_media(&self, file: &SelectedFile, on_progress: &mut dyn FnMut(u8)) -> Result<UploadedMedia>;

    /// Detections for `media`, or for a demo asset when none is selected.
    fn get_detections(&self, media: Option<&UploadedMedia>) -> Result<AnalysisResult>;

    /// Aggregated activity for the dashboard.
    fn get_dashboard(&self) -> Result<DashboardData>;
}

/// Return the API implementation for `mode`.
pub fn get_api(mode: ApiMode, settings: &Settings) -> Arc<dyn MediaApi> {
    match mode {
        ApiMode::Mock => Arc::new(mock::MockApi::new(settings.mock_latency)),
        ApiMode::Real => Arc::new(real::RealApi),
    }
}
