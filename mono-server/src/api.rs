//! REST API and SSE routes

use crate::advisor::{AdvisorError, RideAnalysis};
use crate::presets;
use crate::recorder::RecorderSnapshot;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{Stream, StreamExt as FuturesStreamExt};
use mono_core::gpx;
use mono_core::model::{RideMode, TelemetrySample, WheelConfig};
use mono_core::source::TelemetrySource;
use mono_core::tour::{
    MediaItem, MediaKind, RecordingStatus, RoutePreset, TourError, TourRecord,
};
use mono_wheels::{catalog, scanner, SimulatedWheel};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::CorsLayer;

/// Tilt-back speed shown on the status surface
const TILT_BACK_KMH: f32 = 75.0;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/api/status", get(status))
        .route("/api/wheels", get(list_wheels))
        .route("/api/scan", post(scan_wheels))
        .route("/api/wheels/select", post(select_wheel).delete(deselect_wheel))
        .route("/api/mode", post(set_mode))
        .route("/api/telemetry", get(latest_telemetry))
        .route("/api/telemetry/history", get(telemetry_history))
        .route("/api/telemetry/stream", get(telemetry_stream))
        .route("/api/routes", get(list_routes))
        .route("/api/recorder", get(recorder_status))
        .route("/api/recorder/start", post(start_tour))
        .route("/api/recorder/pause", post(pause_tour))
        .route("/api/recorder/resume", post(resume_tour))
        .route("/api/recorder/media", post(add_media))
        .route("/api/recorder/finish", post(finish_tour))
        .route("/api/tours", get(list_tours))
        .route("/api/tours/:id", get(get_tour))
        .route("/api/tours/:id/gpx", get(export_tour_gpx))
        .route("/api/advisor/chat", post(advisor_chat))
        .route("/api/advisor/analysis", post(advisor_analysis))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn tour_error(e: TourError) -> (StatusCode, String) {
    (StatusCode::CONFLICT, e.to_string())
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "monobility-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn healthz() -> &'static str {
    "ok"
}

// === Status Endpoint ===

async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let wheel = state.selected_wheel.read().await.clone();
    let ride_mode = *state.ride_mode.read().await;
    let latest = state.history.read().await.latest().cloned();
    let recorder = state.recorder.read().await.snapshot();

    let pwm_alert = latest.as_ref().map(|s| s.pwm_alert()).unwrap_or(false);
    let pwm_headroom = latest.as_ref().map(|s| s.pwm_headroom());

    Json(serde_json::json!({
        "connected": wheel.is_some(),
        "wheel": wheel,
        "ride_mode": ride_mode,
        "tilt_back_kmh": TILT_BACK_KMH,
        "telemetry": latest,
        "pwm_alert": pwm_alert,
        "pwm_headroom": pwm_headroom,
        "recorder": recorder,
    }))
}

// === Wheel Endpoints ===

#[derive(Serialize)]
struct WheelInfo {
    #[serde(flatten)]
    config: WheelConfig,
    connected: bool,
}

async fn list_wheels(State(state): State<AppState>) -> Json<Vec<WheelInfo>> {
    let selected = state.selected_wheel.read().await;
    let selected_id = selected.as_ref().map(|w| w.id.as_str());

    let wheels = catalog::available_wheels()
        .into_iter()
        .map(|config| WheelInfo {
            connected: selected_id == Some(config.id.as_str()),
            config,
        })
        .collect();

    Json(wheels)
}

/// Mock Bluetooth discovery; the artificial delay mimics a real scan window
async fn scan_wheels(State(state): State<AppState>) -> Json<Vec<WheelConfig>> {
    tokio::time::sleep(state.config.scan_delay).await;
    Json(scanner::discovered_wheels())
}

#[derive(Deserialize)]
struct SelectWheelRequest {
    id: String,
}

async fn select_wheel(
    State(state): State<AppState>,
    Json(request): Json<SelectWheelRequest>,
) -> Result<Json<WheelConfig>, (StatusCode, String)> {
    let config = catalog::find(&request.id).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown wheel: {}", request.id),
    ))?;

    {
        let recorder = state.recorder.read().await;
        if recorder.status() != RecordingStatus::Idle {
            return Err((
                StatusCode::CONFLICT,
                "Cannot switch wheels while a tour is being recorded".to_string(),
            ));
        }
    }

    let mut wheel = SimulatedWheel::new(config.clone());
    wheel
        .connect()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to connect: {}", e)))?;

    {
        let mut source = state.source.write().await;
        if let Some(old) = source.as_mut() {
            if let Err(e) = old.disconnect() {
                tracing::warn!("Error disconnecting previous wheel: {}", e);
            }
        }
        *source = Some(Box::new(wheel));
    }
    *state.selected_wheel.write().await = Some(config.clone());
    state.history.write().await.clear();

    tracing::info!("Wheel {} connected", config.model);
    Ok(Json(config))
}

async fn deselect_wheel(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    {
        let recorder = state.recorder.read().await;
        if recorder.status() != RecordingStatus::Idle {
            return Err((
                StatusCode::CONFLICT,
                "Cannot disconnect while a tour is being recorded".to_string(),
            ));
        }
    }

    {
        let mut source = state.source.write().await;
        match source.as_mut() {
            Some(wheel) => {
                if let Err(e) = wheel.disconnect() {
                    tracing::warn!("Error disconnecting wheel: {}", e);
                }
            }
            None => return Err((StatusCode::NOT_FOUND, "No wheel selected".to_string())),
        }
        *source = None;
    }
    *state.selected_wheel.write().await = None;
    state.history.write().await.clear();

    tracing::info!("Wheel disconnected");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct SetModeRequest {
    mode: RideMode,
}

async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<SetModeRequest>,
) -> Json<serde_json::Value> {
    *state.ride_mode.write().await = request.mode;
    tracing::info!("Ride mode set to {:?}", request.mode);
    Json(serde_json::json!({ "mode": request.mode }))
}

// === Telemetry Endpoints ===

async fn latest_telemetry(
    State(state): State<AppState>,
) -> Result<Json<TelemetrySample>, (StatusCode, String)> {
    let history = state.history.read().await;
    match history.latest() {
        Some(sample) => Ok(Json(sample.clone())),
        None => Err((StatusCode::NOT_FOUND, "No telemetry yet".to_string())),
    }
}

async fn telemetry_history(State(state): State<AppState>) -> Json<Vec<TelemetrySample>> {
    Json(state.history.read().await.samples())
}

async fn telemetry_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(sample) => match serde_json::to_string(&sample) {
                Ok(json) => Some(Ok(Event::default().data(json))),
                Err(e) => {
                    tracing::error!("Failed to serialize sample: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Broadcast stream error: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// === Route Endpoints ===

async fn list_routes() -> Json<Vec<RoutePreset>> {
    Json(presets::available_routes())
}

// === Recorder Endpoints ===

async fn recorder_status(State(state): State<AppState>) -> Json<RecorderSnapshot> {
    Json(state.recorder.read().await.snapshot())
}

#[derive(Deserialize, Default)]
struct StartTourRequest {
    /// Preset route to follow; omitted for a free ride
    route_id: Option<String>,
}

async fn start_tour(
    State(state): State<AppState>,
    Json(request): Json<StartTourRequest>,
) -> Result<Json<RecorderSnapshot>, (StatusCode, String)> {
    let route = match &request.route_id {
        Some(id) => Some(
            presets::find(id).ok_or((StatusCode::NOT_FOUND, format!("Unknown route: {}", id)))?,
        ),
        None => None,
    };

    let wheel_model = {
        let wheel = state.selected_wheel.read().await;
        match &*wheel {
            Some(w) => w.model.clone(),
            None => return Err((StatusCode::CONFLICT, "No wheel selected".to_string())),
        }
    };

    let odometer_km = {
        let history = state.history.read().await;
        history.latest().map(|s| s.distance.0).unwrap_or(0.0)
    };

    let mut recorder = state.recorder.write().await;
    recorder
        .start(&wheel_model, odometer_km, route)
        .map_err(tour_error)?;

    tracing::info!("Tour recording started on {}", wheel_model);
    Ok(Json(recorder.snapshot()))
}

async fn pause_tour(
    State(state): State<AppState>,
) -> Result<Json<RecorderSnapshot>, (StatusCode, String)> {
    let mut recorder = state.recorder.write().await;
    recorder.pause().map_err(tour_error)?;
    Ok(Json(recorder.snapshot()))
}

async fn resume_tour(
    State(state): State<AppState>,
) -> Result<Json<RecorderSnapshot>, (StatusCode, String)> {
    let mut recorder = state.recorder.write().await;
    recorder.resume().map_err(tour_error)?;
    Ok(Json(recorder.snapshot()))
}

#[derive(Deserialize)]
struct AddMediaRequest {
    kind: MediaKind,
    url: String,
}

async fn add_media(
    State(state): State<AppState>,
    Json(request): Json<AddMediaRequest>,
) -> Result<(StatusCode, Json<MediaItem>), (StatusCode, String)> {
    let mut recorder = state.recorder.write().await;
    let item = recorder
        .add_media(request.kind, request.url)
        .map_err(tour_error)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn finish_tour(
    State(state): State<AppState>,
) -> Result<Json<TourRecord>, (StatusCode, String)> {
    let tour = {
        let mut recorder = state.recorder.write().await;
        recorder.finish().map_err(tour_error)?
    };

    let mut store = state.store.write().await;
    store.append(tour.clone()).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save tour: {}", e),
        )
    })?;

    tracing::info!("Tour {} saved ({} points)", tour.id, tour.points.len());
    Ok(Json(tour))
}

// === Tour Log Endpoints ===

async fn list_tours(State(state): State<AppState>) -> Json<Vec<TourRecord>> {
    Json(state.store.read().await.list().to_vec())
}

async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TourRecord>, (StatusCode, String)> {
    let store = state.store.read().await;
    match store.get(&id) {
        Some(tour) => Ok(Json(tour.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("Unknown tour: {}", id))),
    }
}

async fn export_tour_gpx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let tour = store
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("Unknown tour: {}", id)))?;

    let document = gpx::tour_to_gpx(tour);
    let filename = gpx::export_filename(&tour.name);
    let headers = [
        (header::CONTENT_TYPE, "application/gpx+xml".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, document))
}

// === Advisor Endpoints ===

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

async fn advisor_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let sample = {
        let history = state.history.read().await;
        history.latest().cloned()
    }
    .ok_or((StatusCode::CONFLICT, "No telemetry yet".to_string()))?;

    let reply = match &state.advisor {
        Some(advisor) => match advisor.expert_advice(&request.message, &sample).await {
            Ok(text) => text,
            Err(AdvisorError::EmptyReply) => "Support link disrupted.".to_string(),
            Err(e) => {
                tracing::warn!("Advice request failed: {}", e);
                "Error connecting to monobility Expert.".to_string()
            }
        },
        None => "Error connecting to monobility Expert.".to_string(),
    };

    Ok(Json(serde_json::json!({ "reply": reply })))
}

async fn advisor_analysis(
    State(state): State<AppState>,
) -> Result<Json<RideAnalysis>, (StatusCode, String)> {
    let advisor = state.advisor.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Advice service not configured".to_string(),
    ))?;

    let samples = state.history.read().await.samples();
    if samples.is_empty() {
        return Err((StatusCode::CONFLICT, "No telemetry yet".to_string()));
    }

    let verdict = advisor.analyze_ride(&samples).await.map_err(|e| {
        tracing::warn!("Ride analysis failed: {}", e);
        (StatusCode::BAD_GATEWAY, format!("Analysis failed: {}", e))
    })?;

    Ok(Json(verdict))
}
