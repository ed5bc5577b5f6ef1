//! Gemini-backed riding advisor
//!
//! Thin proxy over the Gemini `generateContent` REST endpoint. Two shapes
//! of request: free-form expert advice grounded in the latest wheel state,
//! and a structured ride analysis constrained by a response schema. The
//! server key never reaches the browser; handlers call this module instead.

use crate::config::GeminiConfig;
use mono_core::model::TelemetrySample;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SYSTEM_INSTRUCTION: &str = "You are an expert Electric Unicycle (EUC) technician with 10 years of experience. You know all about Begode, Kingsong, Inmotion, and Leaperkim wheels. Be concise, safety-oriented, and technical when necessary.";

/// At most this many samples are forwarded for analysis
const ANALYSIS_SAMPLE_CAP: usize = 50;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advice request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("advice service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("advice reply was empty")]
    EmptyReply,
    #[error("advice reply was not valid JSON: {0}")]
    BadReply(#[from] serde_json::Error),
}

/// Structured verdict returned by ride analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RideAnalysis {
    pub status: HealthStatus,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

pub struct Advisor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Advisor {
    /// Build an advisor if an API key is configured
    pub fn from_config(config: &GeminiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Free-form expert advice for a rider question
    pub async fn expert_advice(
        &self,
        query: &str,
        state: &TelemetrySample,
    ) -> Result<String, AdvisorError> {
        let request = GenerateRequest {
            contents: vec![Content::text(advice_contents(query, state))],
            system_instruction: Some(Content::text(SYSTEM_INSTRUCTION.to_string())),
            generation_config: None,
        };
        self.generate(&request).await
    }

    /// Structured health/efficiency verdict over recent telemetry
    pub async fn analyze_ride(
        &self,
        samples: &[TelemetrySample],
    ) -> Result<RideAnalysis, AdvisorError> {
        let request = GenerateRequest {
            contents: vec![Content::text(analysis_prompt(samples)?)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(analysis_schema()),
            }),
        };
        let text = self.generate(&request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AdvisorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(AdvisorError::Status(response.status()));
        }
        let reply: GenerateResponse = response.json().await?;
        reply.text().ok_or(AdvisorError::EmptyReply)
    }
}

fn advice_contents(query: &str, state: &TelemetrySample) -> String {
    format!(
        "The user asks: \"{}\". The current wheel state is: Speed {}km/h, Battery {}%, Temp {}°C. Provide expert EUC advice.",
        query, state.speed.0, state.battery.0, state.temperature.0
    )
}

fn analysis_prompt(samples: &[TelemetrySample]) -> Result<String, serde_json::Error> {
    let window = &samples[..samples.len().min(ANALYSIS_SAMPLE_CAP)];
    Ok(format!(
        "Analyze the following Electric Unicycle (EUC) ride telemetry data. \n  Points: {}... \n  Provide a health report and efficiency summary.",
        serde_json::to_string(window)?
    ))
}

fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "status": { "type": "STRING", "description": "healthy, warning, or critical" },
            "analysis": { "type": "STRING", "description": "Summary of the ride data" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "issues": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["status", "analysis", "recommendations", "issues"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let part = candidate.content?.parts.into_iter().next()?;
        if part.text.is_empty() {
            None
        } else {
            Some(part.text)
        }
    }
}
