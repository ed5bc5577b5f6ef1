//! Tour records and the recording state machine vocabulary
//!
//! A tour is an ordered run of position samples plus media references,
//! finalized into an immutable TourRecord when recording stops.

use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recorder state: idle -> recording <-> paused -> idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Idle,
    Recording,
    Paused,
}

/// One position fix captured while recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,

    /// Speed at the moment the fix was taken
    pub speed: Kmh,

    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// Reference to a photo or video captured during a tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub kind: MediaKind,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// A finished tour
///
/// Immutable once appended to the store: points and media keep their
/// insertion order, summary figures are computed at finish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRecord {
    /// Epoch-millis string assigned at finish
    pub id: String,

    pub name: String,

    /// Calendar date of the ride (YYYY-MM-DD)
    pub date: String,

    /// Time spent actually recording (paused stretches excluded)
    pub duration_seconds: u64,

    /// Odometer delta over the recorded stretches
    pub distance: Kilometers,

    pub avg_speed: Kmh,
    pub max_speed: Kmh,

    /// Energy drawn while recording, integrated from power samples
    pub energy_used: WattHours,

    /// Model name of the wheel the tour was ridden on
    pub wheel_model: String,

    pub points: Vec<TrackPoint>,
    pub media: Vec<MediaItem>,
}

/// Difficulty grade of a preset route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDifficulty {
    Easy,
    Moderate,
    Hard,
}

/// A predefined route the rider can follow while recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePreset {
    pub id: String,
    pub name: String,
    pub distance_km: Kilometers,
    pub difficulty: RouteDifficulty,
}

/// Invalid recorder transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TourError {
    #[error("a tour is already being recorded")]
    AlreadyActive,

    #[error("no active tour")]
    NoActiveTour,

    #[error("recording is already paused")]
    AlreadyPaused,

    #[error("recording is not paused")]
    NotPaused,
}
