//! Tour recording state machine
//!
//! idle -> recording <-> paused -> idle, driven only by explicit API calls.
//! While recording, every telemetry tick contributes a synthetic position
//! fix, elapsed time and integrated energy. Finishing seals the active tour
//! into an immutable TourRecord.

use chrono::Utc;
use mono_core::model::TelemetrySample;
use mono_core::tour::{
    MediaItem, MediaKind, RecordingStatus, RoutePreset, TourError, TourRecord, TrackPoint,
};
use mono_core::units::{Kilometers, Kmh, WattHours};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

/// Base coordinates for the mock GPS fix (downtown San Francisco)
const GPS_BASE_LAT: f64 = 37.7749;
const GPS_BASE_LON: f64 = -122.4194;

/// One-sided jitter added to each axis per fix
const GPS_JITTER: f64 = 0.001;

pub struct TourRecorder {
    status: RecordingStatus,
    active: Option<ActiveTour>,
    rng: StdRng,
}

struct ActiveTour {
    name: String,
    route: Option<RoutePreset>,
    wheel_model: String,
    start_odometer_km: f32,
    last_odometer_km: f32,
    recorded: Duration,
    energy_wh: f64,
    points: Vec<TrackPoint>,
    media: Vec<MediaItem>,
}

/// Serializable view of the recorder for the API
#[derive(Debug, Clone, Serialize)]
pub struct RecorderSnapshot {
    pub status: RecordingStatus,
    pub name: Option<String>,
    pub route: Option<String>,
    pub duration_seconds: u64,
    pub points: usize,
    pub media: usize,
}

impl TourRecorder {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            status: RecordingStatus::Idle,
            active: None,
            rng,
        }
    }

    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    /// Begin a new tour; only legal from idle
    pub fn start(
        &mut self,
        wheel_model: &str,
        odometer_km: f32,
        route: Option<RoutePreset>,
    ) -> Result<(), TourError> {
        if self.status != RecordingStatus::Idle {
            return Err(TourError::AlreadyActive);
        }

        let name = match &route {
            Some(r) => format!("Ride: {}", r.name),
            None => format!("Session {}", Utc::now().format("%H:%M")),
        };

        self.active = Some(ActiveTour {
            name,
            route,
            wheel_model: wheel_model.to_string(),
            start_odometer_km: odometer_km,
            last_odometer_km: odometer_km,
            recorded: Duration::ZERO,
            energy_wh: 0.0,
            points: Vec::new(),
            media: Vec::new(),
        });
        self.status = RecordingStatus::Recording;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TourError> {
        match self.status {
            RecordingStatus::Recording => {
                self.status = RecordingStatus::Paused;
                Ok(())
            }
            RecordingStatus::Paused => Err(TourError::AlreadyPaused),
            RecordingStatus::Idle => Err(TourError::NoActiveTour),
        }
    }

    pub fn resume(&mut self) -> Result<(), TourError> {
        match self.status {
            RecordingStatus::Paused => {
                self.status = RecordingStatus::Recording;
                Ok(())
            }
            RecordingStatus::Recording => Err(TourError::NotPaused),
            RecordingStatus::Idle => Err(TourError::NoActiveTour),
        }
    }

    /// Attach a media reference to the active tour (recording or paused)
    pub fn add_media(&mut self, kind: MediaKind, url: String) -> Result<MediaItem, TourError> {
        let tour = self.active.as_mut().ok_or(TourError::NoActiveTour)?;
        let now = Utc::now();
        let item = MediaItem {
            id: now.timestamp_millis().to_string(),
            kind,
            url,
            timestamp: now,
        };
        tour.media.push(item.clone());
        Ok(item)
    }

    /// Feed one telemetry tick into the active tour
    ///
    /// No-op unless recording: paused stretches contribute no points,
    /// no elapsed time, no energy and no odometer movement.
    pub fn observe(&mut self, sample: &TelemetrySample, tick: Duration) {
        if self.status != RecordingStatus::Recording || self.active.is_none() {
            return;
        }

        let lat = GPS_BASE_LAT + self.rng.gen_range(0.0..GPS_JITTER);
        let lon = GPS_BASE_LON + self.rng.gen_range(0.0..GPS_JITTER);

        let tour = match self.active.as_mut() {
            Some(t) => t,
            None => return,
        };
        tour.recorded += tick;
        tour.energy_wh += sample.power.0 as f64 * tick.as_secs_f64() / 3600.0;
        tour.last_odometer_km = sample.distance.0;
        tour.points.push(TrackPoint {
            lat,
            lon,
            speed: sample.speed,
            timestamp: sample.timestamp,
        });
    }

    /// Seal the active tour into an immutable record; legal from
    /// recording or paused
    pub fn finish(&mut self) -> Result<TourRecord, TourError> {
        let tour = self.active.take().ok_or(TourError::NoActiveTour)?;
        self.status = RecordingStatus::Idle;

        let now = Utc::now();
        let max_speed = tour.points.iter().map(|p| p.speed.0).fold(0.0f32, f32::max);
        let avg_speed = if tour.points.is_empty() {
            0.0
        } else {
            tour.points.iter().map(|p| p.speed.0).sum::<f32>() / tour.points.len() as f32
        };

        Ok(TourRecord {
            id: now.timestamp_millis().to_string(),
            name: tour.name,
            date: now.format("%Y-%m-%d").to_string(),
            duration_seconds: tour.recorded.as_secs(),
            distance: Kilometers((tour.last_odometer_km - tour.start_odometer_km).max(0.0)),
            avg_speed: Kmh(avg_speed),
            max_speed: Kmh(max_speed),
            energy_used: WattHours(tour.energy_wh as f32),
            wheel_model: tour.wheel_model,
            points: tour.points,
            media: tour.media,
        })
    }

    pub fn snapshot(&self) -> RecorderSnapshot {
        match &self.active {
            Some(t) => RecorderSnapshot {
                status: self.status,
                name: Some(t.name.clone()),
                route: t.route.as_ref().map(|r| r.name.clone()),
                duration_seconds: t.recorded.as_secs(),
                points: t.points.len(),
                media: t.media.len(),
            },
            None => RecorderSnapshot {
                status: self.status,
                name: None,
                route: None,
                duration_seconds: 0,
                points: 0,
                media: 0,
            },
        }
    }
}

impl Default for TourRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mono_core::tour::RouteDifficulty;
    use mono_core::units::{Amps, Celsius, Percent, Volts, Watts};

    const TICK: Duration = Duration::from_secs(1);

    fn sample(speed: f32, power: f32, distance: f32) -> TelemetrySample {
        TelemetrySample {
            speed: Kmh(speed),
            battery: Percent::new(90.0),
            temperature: Celsius(28.0),
            power: Watts(power),
            voltage: Volts(148.0),
            current: Amps(10.0),
            pwm: Percent::new(30.0),
            distance: Kilometers(distance),
            timestamp: Utc::now(),
        }
    }

    fn coastal_trail() -> RoutePreset {
        RoutePreset {
            id: "1".to_string(),
            name: "Coastal Trail".to_string(),
            distance_km: Kilometers(12.4),
            difficulty: RouteDifficulty::Moderate,
        }
    }

    #[test]
    fn test_start_from_idle() {
        let mut rec = TourRecorder::with_seed(1);
        assert_eq!(rec.status(), RecordingStatus::Idle);

        rec.start("Sherman L", 0.0, None).unwrap();
        assert_eq!(rec.status(), RecordingStatus::Recording);

        let snap = rec.snapshot();
        assert!(snap.name.unwrap().starts_with("Session "));
        assert_eq!(snap.points, 0);
    }

    #[test]
    fn test_start_with_route_names_the_ride() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("Sherman L", 0.0, Some(coastal_trail())).unwrap();

        let snap = rec.snapshot();
        assert_eq!(snap.name.unwrap(), "Ride: Coastal Trail");
        assert_eq!(snap.route.unwrap(), "Coastal Trail");
    }

    #[test]
    fn test_start_twice_is_a_conflict() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("Sherman L", 0.0, None).unwrap();
        assert_eq!(
            rec.start("Sherman L", 0.0, None),
            Err(TourError::AlreadyActive)
        );

        rec.pause().unwrap();
        assert_eq!(
            rec.start("Sherman L", 0.0, None),
            Err(TourError::AlreadyActive)
        );
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut rec = TourRecorder::with_seed(1);
        assert_eq!(rec.pause(), Err(TourError::NoActiveTour));
        assert_eq!(rec.resume(), Err(TourError::NoActiveTour));

        rec.start("Sherman L", 0.0, None).unwrap();
        assert_eq!(rec.resume(), Err(TourError::NotPaused));

        rec.pause().unwrap();
        assert_eq!(rec.status(), RecordingStatus::Paused);
        assert_eq!(rec.pause(), Err(TourError::AlreadyPaused));

        rec.resume().unwrap();
        assert_eq!(rec.status(), RecordingStatus::Recording);
    }

    #[test]
    fn test_observe_records_only_while_recording() {
        let mut rec = TourRecorder::with_seed(1);

        // Idle: samples are ignored outright
        rec.observe(&sample(20.0, 1000.0, 0.1), TICK);
        assert_eq!(rec.snapshot().points, 0);

        rec.start("Sherman L", 0.0, None).unwrap();
        rec.observe(&sample(20.0, 1000.0, 0.1), TICK);
        rec.observe(&sample(22.0, 1100.0, 0.2), TICK);
        assert_eq!(rec.snapshot().points, 2);
        assert_eq!(rec.snapshot().duration_seconds, 2);

        rec.pause().unwrap();
        rec.observe(&sample(25.0, 1200.0, 0.3), TICK);
        assert_eq!(rec.snapshot().points, 2, "paused ticks add no points");
        assert_eq!(rec.snapshot().duration_seconds, 2, "paused ticks add no time");

        rec.resume().unwrap();
        rec.observe(&sample(25.0, 1200.0, 0.4), TICK);
        assert_eq!(rec.snapshot().points, 3);
        assert_eq!(rec.snapshot().duration_seconds, 3);
    }

    #[test]
    fn test_points_stay_near_the_mock_base() {
        let mut rec = TourRecorder::with_seed(7);
        rec.start("Sherman L", 0.0, None).unwrap();
        for i in 0..20 {
            rec.observe(&sample(20.0, 1000.0, i as f32 * 0.01), TICK);
        }

        let tour = rec.finish().unwrap();
        for p in &tour.points {
            assert!((GPS_BASE_LAT..GPS_BASE_LAT + GPS_JITTER).contains(&p.lat));
            assert!((GPS_BASE_LON..GPS_BASE_LON + GPS_JITTER).contains(&p.lon));
        }
    }

    #[test]
    fn test_add_media_requires_active_tour() {
        let mut rec = TourRecorder::with_seed(1);
        assert_eq!(
            rec.add_media(MediaKind::Photo, "https://example.com/p.jpg".to_string())
                .unwrap_err(),
            TourError::NoActiveTour
        );

        rec.start("Sherman L", 0.0, None).unwrap();
        let item = rec
            .add_media(MediaKind::Photo, "https://example.com/p.jpg".to_string())
            .unwrap();
        assert_eq!(item.kind, MediaKind::Photo);

        rec.pause().unwrap();
        rec.add_media(MediaKind::Video, "https://example.com/v.mp4".to_string())
            .unwrap();
        assert_eq!(rec.snapshot().media, 2);
    }

    #[test]
    fn test_finish_computes_summary_from_recorded_data() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("Sherman L", 10.0, None).unwrap();

        // 3600 W over one second is exactly 1 Wh
        rec.observe(&sample(10.0, 3600.0, 10.5), TICK);
        rec.observe(&sample(20.0, 3600.0, 11.0), TICK);
        rec.observe(&sample(30.0, 3600.0, 11.5), TICK);

        let tour = rec.finish().unwrap();
        assert_eq!(rec.status(), RecordingStatus::Idle);
        assert_eq!(tour.duration_seconds, 3);
        assert_eq!(tour.points.len(), 3);
        assert!((tour.avg_speed.0 - 20.0).abs() < 1e-4);
        assert!((tour.max_speed.0 - 30.0).abs() < 1e-4);
        assert!((tour.energy_used.0 - 3.0).abs() < 1e-4);
        assert!((tour.distance.0 - 1.5).abs() < 1e-4, "odometer delta, not the raw reading");
        assert_eq!(tour.wheel_model, "Sherman L");
        assert!(tour.id.parse::<u64>().is_ok(), "id is an epoch-millis string");
    }

    #[test]
    fn test_finish_from_paused() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("Lynx", 0.0, None).unwrap();
        rec.observe(&sample(15.0, 900.0, 0.1), TICK);
        rec.pause().unwrap();

        let tour = rec.finish().unwrap();
        assert_eq!(tour.points.len(), 1);
        assert_eq!(rec.status(), RecordingStatus::Idle);
    }

    #[test]
    fn test_finish_when_idle_is_an_error() {
        let mut rec = TourRecorder::with_seed(1);
        assert_eq!(rec.finish().err(), Some(TourError::NoActiveTour));
    }

    #[test]
    fn test_finish_with_no_points_yields_zero_summary() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("Blitz", 5.0, None).unwrap();
        let tour = rec.finish().unwrap();
        assert_eq!(tour.avg_speed.0, 0.0);
        assert_eq!(tour.max_speed.0, 0.0);
        assert_eq!(tour.duration_seconds, 0);
        assert_eq!(tour.distance.0, 0.0);
    }

    #[test]
    fn test_recorder_is_reusable_after_finish() {
        let mut rec = TourRecorder::with_seed(1);
        rec.start("F22", 0.0, None).unwrap();
        rec.finish().unwrap();

        rec.start("F22", 0.0, None).unwrap();
        assert_eq!(rec.status(), RecordingStatus::Recording);
    }
}
