// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mental-health alerting pipeline for Soulscript.
//!
//! A journal entry flows through the pipeline as: queue submit on the
//! request path, trigger evaluation on the worker task, then best-effort
//! notification of the user's emergency contacts over email and SMS.

pub mod contacts;
pub mod dispatcher;
pub mod email;
pub mod evaluator;
pub mod sms;
pub mod types;
pub mod worker;

pub use contacts::{ContactTableSource, LegacyUserSource};
pub use dispatcher::AlertDispatcher;
pub use email::SmtpMailer;
pub use evaluator::{AlertEvaluator, RECENT_WINDOW};
pub use sms::HttpSmsGateway;
pub use types::{AlertContext, AlertJob, DispatchOutcome};
pub use worker::{AlertQueue, AlertWorker};
