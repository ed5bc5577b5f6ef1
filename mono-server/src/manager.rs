//! Telemetry tick loop
//!
//! This module handles:
//! - Polling the selected wheel once per tick
//! - Pushing samples into the trailing history window
//! - Feeding the tour recorder
//! - Broadcasting samples to subscribers

use crate::state::AppState;
use anyhow::Result;
use tokio::time::sleep;
use tracing::{info, warn};

/// Main tick loop
pub async fn run(state: AppState) {
    let tick = state.config.tick;
    info!("Telemetry loop started ({}ms tick)", tick.as_millis());

    loop {
        if let Err(e) = sample_cycle(&state).await {
            warn!("Error in sample cycle: {}", e);
        }
        sleep(tick).await;
    }
}

/// Poll the selected wheel once and fan the sample out
///
/// No-op when no wheel is selected. Split out from the loop so tests can
/// drive ticks without waiting on the wall clock.
pub async fn sample_cycle(state: &AppState) -> Result<()> {
    let sample = {
        let mut source = state.source.write().await;
        match source.as_mut() {
            Some(source) => source.poll()?,
            None => return Ok(()),
        }
    };

    let sample = match sample {
        Some(sample) => sample,
        None => return Ok(()),
    };

    state.history.write().await.push(sample.clone());
    state
        .recorder
        .write()
        .await
        .observe(&sample, state.config.tick);

    // Ignore error if no receivers (they'll get the next sample)
    let _ = state.telemetry_tx.send(sample);

    Ok(())
}
