// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media data structures.
//!
//! This module defines imported files, uploaded media metadata and the
//! media asset shown in the analysis preview.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Aspect ratio assumed when intrinsic dimensions are unknown.
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "mkv"];

/// Kind of media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Guess the kind from a MIME type, falling back to the file extension.
    pub fn guess(name: &str, mime: Option<&str>) -> Option<Self> {
        if let Some(mime) = mime {
            if mime.starts_with("image/") {
                return Some(MediaKind::Image);
            }
            if mime.starts_with("video/") {
                return Some(MediaKind::Video);
            }
        }

        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// MIME-ish type string used in upload metadata.
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// A local file picked or dropped on the Import view, not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: MediaKind,
}

impl SelectedFile {
    /// One-line description: `"<name> • <size> MB"`.
    pub fn info(&self) -> String {
        format!("{} • {:.2} MB", self.name, self.size as f64 / (1024.0 * 1024.0))
    }
}

/// Metadata returned by an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub kind: MediaKind,
    pub uploaded_at: DateTime<Utc>,
    pub path: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl UploadedMedia {
    /// The asset to preview for this upload.
    pub fn asset(&self) -> MediaAsset {
        MediaAsset {
            url: self
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| self.name.clone()),
            kind: self.kind,
            intrinsic_width: self.width,
            intrinsic_height: self.height,
        }
    }
}

/// The media shown under the detection overlay. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub kind: MediaKind,
    pub intrinsic_width: Option<u32>,
    pub intrinsic_height: Option<u32>,
}

impl MediaAsset {
    /// Width / height, or 16:9 when either dimension is unknown or zero.
    pub fn aspect_ratio(&self) -> f32 {
        match (self.intrinsic_width, self.intrinsic_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => w as f32 / h as f32,
            _ => DEFAULT_ASPECT,
        }
    }

    /// Local path for the asset, if it refers to an existing file.
    pub fn local_path(&self) -> Option<PathBuf> {
        let path = PathBuf::from(&self.url);
        path.is_file().then_some(path)
    }
}
