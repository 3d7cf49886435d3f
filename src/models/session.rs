// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state shared across views.
//!
//! Holds the recent uploads and the current media/detection selection.

use super::media::UploadedMedia;

/// Uploaded media and analysis selection for the running app.
#[derive(Debug, Clone)]
pub struct MediaSession {
    uploaded: Vec<UploadedMedia>,
    max_uploads: usize,
    selected_media: Option<String>,
    selected_detection: Option<String>,
}

impl MediaSession {
    pub fn new(max_uploads: usize) -> Self {
        Self {
            uploaded: Vec::new(),
            max_uploads: max_uploads.max(1),
            selected_media: None,
            selected_detection: None,
        }
    }

    /// Record an upload. Newest first, capped at `max_uploads`; the first
    /// upload becomes the selected media.
    pub fn add_uploaded(&mut self, meta: UploadedMedia) {
        if self.selected_media.is_none() {
            self.selected_media = Some(meta.id.clone());
        }
        self.uploaded.insert(0, meta);
        self.uploaded.truncate(self.max_uploads);

        // The selected entry may have been pushed out of the list
        if let Some(id) = &self.selected_media {
            if !self.uploaded.iter().any(|m| &m.id == id) {
                self.selected_media = self.uploaded.first().map(|m| m.id.clone());
            }
        }
    }

    pub fn uploaded(&self) -> &[UploadedMedia] {
        &self.uploaded
    }

    pub fn selected_media(&self) -> Option<&UploadedMedia> {
        let id = self.selected_media.as_ref()?;
        self.uploaded.iter().find(|m| &m.id == id)
    }

    pub fn select_media(&mut self, id: &str) {
        if self.uploaded.iter().any(|m| m.id == id) {
            self.selected_media = Some(id.to_string());
            self.selected_detection = None;
        }
    }

    pub fn selected_detection(&self) -> Option<&str> {
        self.selected_detection.as_deref()
    }

    pub fn select_detection(&mut self, id: Option<String>) {
        self.selected_detection = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaKind;
    use chrono::Utc;

    fn meta(id: &str) -> UploadedMedia {
        UploadedMedia {
            id: id.to_string(),
            name: format!("{id}.jpg"),
            size: 1024,
            mime: "image".to_string(),
            kind: MediaKind::Image,
            uploaded_at: Utc::now(),
            path: None,
            width: Some(1200),
            height: Some(800),
        }
    }

    #[test]
    fn test_uploads_are_newest_first_and_capped() {
        let mut session = MediaSession::new(3);
        for id in ["a", "b", "c", "d"] {
            session.add_uploaded(meta(id));
        }
        let ids: Vec<_> = session.uploaded().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_first_upload_is_selected() {
        let mut session = MediaSession::new(20);
        session.add_uploaded(meta("a"));
        session.add_uploaded(meta("b"));
        assert_eq!(session.selected_media().map(|m| m.id.as_str()), Some("a"));

        session.select_media("b");
        assert_eq!(session.selected_media().map(|m| m.id.as_str()), Some("b"));

        // Unknown ids are ignored
        session.select_media("zzz");
        assert_eq!(session.selected_media().map(|m| m.id.as_str()), Some("b"));
    }

    #[test]
    fn test_selection_follows_eviction() {
        let mut session = MediaSession::new(1);
        session.add_uploaded(meta("a"));
        session.add_uploaded(meta("b"));
        assert_eq!(session.selected_media().map(|m| m.id.as_str()), Some("b"));
    }

    #[test]
    fn test_selecting_media_clears_detection() {
        let mut session = MediaSession::new(5);
        session.add_uploaded(meta("a"));
        session.select_detection(Some("1".to_string()));
        assert_eq!(session.selected_detection(), Some("1"));
        session.select_media("a");
        assert_eq!(session.selected_detection(), None);
    }
}
