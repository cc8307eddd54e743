// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background alert processing.
//!
//! Journal handlers never await alerting. They push an [`AlertJob`] onto a
//! bounded queue and return; the [`AlertWorker`] drains the queue on its own
//! task. A full queue drops the job with a warning rather than applying
//! backpressure to the request path.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::dispatcher::AlertDispatcher;
use crate::evaluator::AlertEvaluator;
use crate::types::AlertJob;

/// Producer half of the alert queue. Cheap to clone.
#[derive(Clone)]
pub struct AlertQueue {
    tx: mpsc::Sender<AlertJob>,
}

impl AlertQueue {
    /// Create a queue with the given capacity, returning the producer handle
    /// and the receiver the worker drains.
    pub fn new(depth: usize) -> (Self, mpsc::Receiver<AlertJob>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx }, rx)
    }

    /// Enqueue a job without waiting. Drops the job when the queue is full.
    pub fn submit(&self, job: AlertJob) {
        if let Err(e) = self.tx.try_send(job) {
            warn!(error = %e, "alert queue full, dropping job");
        }
    }
}

/// Drains the alert queue: evaluates each entry and dispatches whatever
/// alerts it produces.
pub struct AlertWorker {
    rx: mpsc::Receiver<AlertJob>,
    evaluator: AlertEvaluator,
    dispatcher: AlertDispatcher,
}

impl AlertWorker {
    pub fn new(
        rx: mpsc::Receiver<AlertJob>,
        evaluator: AlertEvaluator,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            rx,
            evaluator,
            dispatcher,
        }
    }

    /// Run until the queue closes or `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!("alert worker running");
        loop {
            tokio::select! {
                job = self.rx.recv() => {
                    match job {
                        Some(job) => self.handle(job).await,
                        None => {
                            info!("alert queue closed, stopping worker");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping alert worker");
                    break;
                }
            }
        }
    }

    async fn handle(&self, job: AlertJob) {
        let user_id = job.entry.user_id.clone();
        let alerts = self.evaluator.evaluate(&job.entry).await;
        for ctx in alerts {
            let outcome = self.dispatcher.notify(&user_id, &ctx).await;
            info!(
                user_id = %user_id,
                success = outcome.success,
                notified = outcome.notified,
                "alert processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use soulscript_core::{
        JournalEntry, Mailer, MentalHealthLabel, OutboundEmail, Role, SoulscriptError, User,
    };
    use soulscript_storage::{Database, queries};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::tempdir;

    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<(), SoulscriptError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn worker_processes_submitted_job_and_stops_on_cancel() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let user = User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
            specialization: None,
            emergency_contacts: vec![soulscript_core::LegacyContact {
                name: "Grace".to_string(),
                phone: None,
                email: Some("grace@example.com".to_string()),
            }],
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        queries::users::create_user(&db, &user).await.unwrap();

        let entry = JournalEntry {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            title: "dark".to_string(),
            content: "words".to_string(),
            mood: "low".to_string(),
            label: MentalHealthLabel::Suicidal,
            confidence: 0.95,
            date: "2026-01-05T20:00:00.000Z".to_string(),
            created_at: "2026-01-05T20:00:00.000Z".to_string(),
            updated_at: "2026-01-05T20:00:00.000Z".to_string(),
        };
        queries::entries::insert_entry(&db, &entry).await.unwrap();

        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
        });
        let dispatcher = AlertDispatcher::new(
            db.clone(),
            vec![Arc::new(crate::contacts::LegacyUserSource::new(db.clone()))],
            Some(mailer.clone()),
            None,
        );
        let evaluator = AlertEvaluator::new(db.clone());

        let (queue, rx) = AlertQueue::new(8);
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(AlertWorker::new(rx, evaluator, dispatcher).run(cancel.clone()));

        queue.submit(AlertJob { entry });

        // Give the worker a moment to drain the queue.
        for _ in 0..50 {
            if !mailer.sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        cancel.cancel();
        worker.await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_queue_drops_jobs_without_blocking() {
        let (queue, _rx) = AlertQueue::new(1);
        let entry = JournalEntry {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            mood: "m".to_string(),
            label: MentalHealthLabel::Normal,
            confidence: 0.8,
            date: "2026-01-01T00:00:00.000Z".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        // Second submit overflows the queue; it must return immediately.
        queue.submit(AlertJob {
            entry: entry.clone(),
        });
        queue.submit(AlertJob { entry });
    }
}
