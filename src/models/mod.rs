// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for media, detections, dashboard aggregates and session state.

pub mod dashboard;
pub mod detection;
pub mod media;
pub mod session;
