//! Application state management

use crate::advisor::Advisor;
use crate::config::ServerConfig;
use crate::recorder::TourRecorder;
use crate::store::TourStore;
use mono_core::model::{RideMode, TelemetryHistory, TelemetrySample, WheelConfig};
use mono_core::source::TelemetrySource;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Telemetry source for the selected wheel (None until a wheel is selected)
    pub source: Arc<RwLock<Option<Box<dyn TelemetrySource>>>>,

    /// Spec sheet of the selected wheel
    pub selected_wheel: Arc<RwLock<Option<WheelConfig>>>,

    /// Trailing window of recent samples
    pub history: Arc<RwLock<TelemetryHistory>>,

    /// Broadcast channel for telemetry samples
    /// Multiple consumers can subscribe to receive samples
    pub telemetry_tx: broadcast::Sender<TelemetrySample>,

    /// Tour recording state machine
    pub recorder: Arc<RwLock<TourRecorder>>,

    /// Persisted tour log
    pub store: Arc<RwLock<TourStore>>,

    /// Pedal stiffness mode reported on the status surface
    pub ride_mode: Arc<RwLock<RideMode>>,

    /// Gemini proxy (None when no API key is configured)
    pub advisor: Option<Arc<Advisor>>,

    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        // Create broadcast channel with capacity for 100 samples
        let (telemetry_tx, _) = broadcast::channel(100);

        let advisor = Advisor::from_config(&config.gemini).map(Arc::new);
        let store = TourStore::open(&config.data_dir);

        Self {
            source: Arc::new(RwLock::new(None)),
            selected_wheel: Arc::new(RwLock::new(None)),
            history: Arc::new(RwLock::new(TelemetryHistory::new())),
            telemetry_tx,
            recorder: Arc::new(RwLock::new(TourRecorder::new())),
            store: Arc::new(RwLock::new(store)),
            ride_mode: Arc::new(RwLock::new(RideMode::default())),
            advisor,
            config: Arc::new(config),
        }
    }

    /// Subscribe to telemetry samples
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetrySample> {
        self.telemetry_tx.subscribe()
    }
}
