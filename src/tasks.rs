// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background work for the UI thread.
//!
//! Each request runs on its own thread and reports back over a channel that
//! the UI polls once per frame. Dropping the handle discards the result.

use crate::api::MediaApi;
use crate::io::media::{load_image, LoadedImage};
use crate::models::{
    dashboard::DashboardData,
    detection::AnalysisResult,
    media::{SelectedFile, UploadedMedia},
};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

/// A result that will arrive from a worker thread.
pub struct Pending<T> {
    receiver: Receiver<Result<T, String>>,
}

impl<T: Send + 'static> Pending<T> {
    /// Run `job` on a new thread.
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        let (sender, receiver) = channel();
        std::thread::spawn(move || {
            let result = job().map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
        Self { receiver }
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> Option<Result<T, String>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err("Worker stopped unexpectedly".to_string())),
        }
    }
}

/// An upload in flight, with progress updates.
pub struct UploadTask {
    progress: Receiver<u8>,
    result: Pending<UploadedMedia>,
    last_progress: u8,
}

impl UploadTask {
    pub fn spawn(api: Arc<dyn MediaApi>, file: SelectedFile) -> Self {
        let (progress_tx, progress_rx) = channel();
        let result = Pending::spawn(move || {
            api.upload_media(&file, &mut |p| {
                let _ = progress_tx.send(p);
            })
        });
        Self {
            progress: progress_rx,
            result,
            last_progress: 0,
        }
    }

    /// Latest progress in percent, draining queued updates.
    pub fn progress(&mut self) -> u8 {
        while let Ok(p) = self.progress.try_recv() {
            self.last_progress = p;
        }
        self.last_progress
    }

    pub fn poll(&self) -> Option<Result<UploadedMedia, String>> {
        self.result.poll()
    }
}

pub fn fetch_detections(api: Arc<dyn MediaApi>, media: Option<UploadedMedia>) -> Pending<AnalysisResult> {
    Pending::spawn(move || api.get_detections(media.as_ref()))
}

pub fn fetch_dashboard(api: Arc<dyn MediaApi>) -> Pending<DashboardData> {
    Pending::spawn(move || api.get_dashboard())
}

pub fn decode_image(path: PathBuf) -> Pending<LoadedImage> {
    Pending::spawn(move || {
        let img = load_image(&path)?;
        log::info!("Loaded image: {} ({}x{})", path.display(), img.width, img.height);
        Ok(img)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::models::media::MediaKind;
    use std::time::{Duration, Instant};

    fn wait_for<T>(poll: impl Fn() -> Option<T>) -> T {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(v) = poll() {
                return v;
            }
            assert!(Instant::now() < deadline, "timed out waiting for worker");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_pending_delivers_result() {
        let pending = Pending::spawn(|| Ok(21 * 2));
        assert_eq!(wait_for(|| pending.poll()), Ok(42));
    }

    #[test]
    fn test_pending_delivers_error_text() {
        let pending: Pending<()> = Pending::spawn(|| anyhow::bail!("camera offline"));
        assert_eq!(wait_for(|| pending.poll()), Err("camera offline".to_string()));
    }

    #[test]
    fn test_upload_task_reaches_100() {
        let api: Arc<dyn MediaApi> = Arc::new(MockApi::new(0.0));
        let file = SelectedFile {
            path: PathBuf::from("/nonexistent/clip.webm"),
            name: "clip.webm".to_string(),
            size: 10,
            kind: MediaKind::Video,
        };
        let mut task = UploadTask::spawn(api, file);
        let meta = wait_for(|| task.poll()).unwrap();
        assert_eq!(meta.name, "clip.webm");
        assert_eq!(task.progress(), 100);
    }

    #[test]
    fn test_fetch_detections_and_dashboard() {
        let api: Arc<dyn MediaApi> = Arc::new(MockApi::new(0.0));
        let detections = fetch_detections(api.clone(), None);
        let dashboard = fetch_dashboard(api);
        assert_eq!(wait_for(|| detections.poll()).unwrap().detections.len(), 3);
        assert_eq!(wait_for(|| dashboard.poll()).unwrap().time_series.len(), 8);
    }
}
