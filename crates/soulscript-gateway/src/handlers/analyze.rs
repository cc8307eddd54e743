// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standalone text analysis endpoint.
//!
//! Classifies arbitrary text without creating a journal entry. Public, like
//! the health endpoint: it stores nothing and touches no account data.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use soulscript_core::MentalHealthLabel;

use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub mental_health_class: MentalHealthLabel,
    pub confidence: f64,
    pub from_model: bool,
}

fn advisory_text(label: MentalHealthLabel, confidence: f64, from_model: bool) -> String {
    let qualifier = if from_model {
        format!(" (confidence: {confidence:.2})")
    } else {
        String::new()
    };
    format!(
        "Based on the content of your journal entry, it appears you may be \
         experiencing symptoms consistent with **{label}**{qualifier}. This is an \
         automated analysis and should not be considered as professional medical \
         advice. Please consult with a mental health professional for proper \
         evaluation and support."
    )
}

/// POST /v1/analyze
pub async fn post_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let prediction = state.classifier.classify(&body.content).await;
    Ok(Json(AnalyzeResponse {
        analysis: advisory_text(prediction.label, prediction.confidence, prediction.from_model),
        mental_health_class: prediction.label,
        confidence: prediction.confidence,
        from_model: prediction.from_model,
    }))
}
