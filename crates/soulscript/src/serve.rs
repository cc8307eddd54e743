// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `soulscript serve` command implementation.
//!
//! Wires together storage, the sentiment classifier, the alert pipeline,
//! and the HTTP API, then serves until SIGINT/SIGTERM.

use std::path::Path;
use std::sync::Arc;

use soulscript_alerts::{
    AlertDispatcher, AlertEvaluator, AlertQueue, AlertWorker, ContactTableSource, HttpSmsGateway,
    LegacyUserSource, SmtpMailer,
};
use soulscript_classifier::SentimentClient;
use soulscript_config::SoulscriptConfig;
use soulscript_core::{ContactSource, Mailer, SmsGateway, SoulscriptError};
use soulscript_gateway::{AppState, TokenSigner, start_server};
use soulscript_storage::Database;
use tracing::{info, warn};

/// Runs the `soulscript serve` command.
pub async fn run_serve(config: SoulscriptConfig) -> Result<(), SoulscriptError> {
    init_tracing(&config.server.log_level);

    info!("starting soulscript serve");

    // Initialize storage.
    if let Some(parent) = Path::new(&config.storage.database_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SoulscriptError::Config(format!(
                "cannot create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    let db = Database::open(&config.storage.database_path).await?;
    info!(path = %config.storage.database_path, "database ready");

    let classifier = SentimentClient::new(&config.classifier)?;

    // Notification channels are optional; an unconfigured channel means
    // alerts silently skip that leg.
    let mailer: Option<Arc<dyn Mailer>> = match config.email.smtp_host {
        Some(_) => Some(Arc::new(SmtpMailer::new(&config.email)?)),
        None => {
            info!("email.smtp_host not set, alert mail disabled");
            None
        }
    };
    let sms: Option<Arc<dyn SmsGateway>> = match config.sms.account_sid {
        Some(_) => Some(Arc::new(HttpSmsGateway::new(&config.sms)?)),
        None => {
            info!("sms.account_sid not set, alert SMS disabled");
            None
        }
    };

    // Alert pipeline: bounded queue drained by a background worker.
    let sources: Vec<Arc<dyn ContactSource>> = vec![
        Arc::new(ContactTableSource::new(db.clone())),
        Arc::new(LegacyUserSource::new(db.clone())),
    ];
    let dispatcher = AlertDispatcher::new(db.clone(), sources, mailer, sms);
    let evaluator = AlertEvaluator::new(db.clone());
    let (alerts, alert_rx) = AlertQueue::new(config.alerts.queue_depth);

    let cancel = crate::shutdown::install_signal_handler();
    let worker =
        tokio::spawn(AlertWorker::new(alert_rx, evaluator, dispatcher).run(cancel.clone()));

    let signer = config
        .auth
        .token_secret
        .clone()
        .map(|secret| TokenSigner::new(secret, i64::from(config.auth.token_ttl_days)));
    if signer.is_none() {
        warn!("auth.token_secret not set, authenticated routes will reject all requests");
    }

    let state = AppState {
        db,
        classifier,
        alerts,
        signer,
        start_time: std::time::Instant::now(),
    };

    let result = start_server(&config.server, state, cancel.clone()).await;

    // Stop the worker and wait for it to drain.
    cancel.cancel();
    if let Err(e) = worker.await {
        warn!(error = %e, "alert worker task panicked");
    }
    info!("soulscript serve stopped");

    result
}

/// Initializes the tracing subscriber from config, unless `RUST_LOG` is set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("soulscript={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
