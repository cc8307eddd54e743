// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the sentiment analysis model server.
//!
//! Provides [`SentimentClient`] which probes the server for availability,
//! requests a classification, and degrades to a random fallback label when
//! the server is unreachable or misbehaving. Classification never fails:
//! journal entries are always written with some label.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use soulscript_core::{MentalHealthLabel, SoulscriptError};
use soulscript_config::ClassifierConfig;
use tracing::{debug, warn};

/// A classification outcome.
///
/// `from_model` is false when the label came from the random fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: MentalHealthLabel,
    pub confidence: f64,
    pub from_model: bool,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    sentiment: String,
    confidence: f64,
}

/// Client for the model server's `POST /analyze` endpoint.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl SentimentClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, SoulscriptError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SoulscriptError::Classifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Classify `text`, falling back to a random label when the model server
    /// is unavailable. This never returns an error.
    pub async fn classify(&self, text: &str) -> Prediction {
        if !self.probe().await {
            warn!("sentiment server not available, using fallback random assignment");
            return fallback_prediction();
        }

        let url = format!("{}/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(&AnalyzeRequest { text })
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "sentiment request failed, using fallback");
                return fallback_prediction();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "sentiment server returned error status, using fallback");
            return fallback_prediction();
        }

        let body: AnalyzeResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "sentiment response malformed, using fallback");
                return fallback_prediction();
            }
        };

        let label: MentalHealthLabel = match body.sentiment.parse() {
            Ok(l) => l,
            Err(_) => {
                warn!(sentiment = %body.sentiment, "unknown sentiment label, using fallback");
                return fallback_prediction();
            }
        };

        // Confidence must land in [0, 1] no matter what the server sends.
        if !body.confidence.is_finite() || !(0.0..=1.0).contains(&body.confidence) {
            warn!(confidence = body.confidence, "sentiment confidence out of range, using fallback");
            return fallback_prediction();
        }

        debug!(label = %label, confidence = body.confidence, "sentiment classified");
        Prediction {
            label,
            confidence: body.confidence,
            from_model: true,
        }
    }

    /// Cheap availability check before the real request, with a short timeout.
    async fn probe(&self) -> bool {
        let url = format!("{}/analyze", self.base_url);
        let result = self
            .client
            .post(&url)
            .timeout(self.probe_timeout)
            .json(&AnalyzeRequest { text: "test" })
            .send()
            .await;

        match result {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                debug!(error = %e, "sentiment server probe failed");
                false
            }
        }
    }
}

fn fallback_prediction() -> Prediction {
    let mut rng = rand::thread_rng();
    let label = MentalHealthLabel::ALL[rng.gen_range(0..MentalHealthLabel::ALL.len())];
    // Plausible-looking confidence in [0.7, 0.9).
    let confidence = 0.7 + rng.r#gen::<f64>() * 0.2;
    Prediction {
        label,
        confidence,
        from_model: false,
    }
}
