// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placeholder for a networked backend. Every call fails until one is wired up.

use super::MediaApi;
use crate::models::{
    dashboard::DashboardData,
    detection::AnalysisResult,
    media::{SelectedFile, UploadedMedia},
};
use anyhow::{bail, Result};

const NOT_CONFIGURED: &str = "Real API not configured. Switch API mode to 'mock'.";

pub struct RealApi;

impl MediaApi for RealApi {
    fn upload_media(&self, _file: &SelectedFile, _on_progress: &mut dyn FnMut(u8)) -> Result<UploadedMedia> {
        bail!(NOT_CONFIGURED)
    }

    fn get_detections(&self, _media: Option<&UploadedMedia>) -> Result<AnalysisResult> {
        bail!(NOT_CONFIGURED)
    }

    fn get_dashboard(&self) -> Result<DashboardData> {
        bail!(NOT_CONFIGURED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_api_reports_not_configured() {
        let err = RealApi.get_detections(None).unwrap_err();
        assert_eq!(err.to_string(), NOT_CONFIGURED);
    }
}
