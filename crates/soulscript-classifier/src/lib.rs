// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentiment classification client for Soulscript.
//!
//! Talks to the external model server and provides a degraded random
//! fallback so journal writes never block on the model.

pub mod client;

pub use client::{Prediction, SentimentClient};
