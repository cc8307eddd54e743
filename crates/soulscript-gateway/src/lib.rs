// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Soulscript platform.
//!
//! Exposes account, journal, emergency contact, and analysis endpoints over
//! axum, with bearer token authentication on everything except health,
//! registration, login, and standalone analysis.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::TokenSigner;
pub use server::{AppState, build_router, start_server};
