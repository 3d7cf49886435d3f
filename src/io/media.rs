// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! This module decodes images for the analysis preview and inspects picked
//! files before they are uploaded.

use crate::models::media::{MediaKind, SelectedFile};
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Decoded RGBA image ready to become an egui texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Read image dimensions from the header without decoding pixels.
pub fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::warn!("Could not read dimensions of {}: {}", path.display(), e);
            None
        }
    }
}

/// Build a [`SelectedFile`] for a picked or dropped path.
///
/// `mime` comes from drag-and-drop when the platform provides one.
pub fn inspect_file(path: &Path, mime: Option<&str>) -> Result<SelectedFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;

    let kind = MediaKind::guess(&name, mime.filter(|m| !m.is_empty()))
        .ok_or_else(|| anyhow!("Unsupported file type. Please select an image or video."))?;

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();

    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        size,
        kind,
    })
}
