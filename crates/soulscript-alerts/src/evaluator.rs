// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert trigger evaluation.
//!
//! Evaluation runs off the request path and is strictly best-effort: any
//! storage failure is logged and swallowed, never surfaced to the user.

use soulscript_core::{JournalEntry, MentalHealthLabel};
use soulscript_storage::{Database, queries};
use tracing::warn;

use crate::types::AlertContext;

/// How many recent entries the pattern trigger looks at.
pub const RECENT_WINDOW: usize = 5;

/// Decides which alerts a newly created entry should produce.
pub struct AlertEvaluator {
    db: Database,
}

impl AlertEvaluator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Evaluate both triggers for `entry`. Returns zero, one, or two alert
    /// contexts; both triggers may fire for the same entry.
    pub async fn evaluate(&self, entry: &JournalEntry) -> Vec<AlertContext> {
        let mut alerts = Vec::new();

        if entry.label == MentalHealthLabel::Suicidal {
            alerts.push(AlertContext::Suicidal {
                entry_title: entry.title.clone(),
                entry_date: entry.date.clone(),
            });
        }

        match queries::entries::recent_for_user(&self.db, &entry.user_id, RECENT_WINDOW as i64)
            .await
        {
            Ok(recent) => {
                if let Some(ctx) = pattern_alert(&recent) {
                    alerts.push(ctx);
                }
            }
            Err(e) => {
                warn!(error = %e, user_id = %entry.user_id, "failed to load recent entries for pattern check");
            }
        }

        alerts
    }
}

/// The pattern trigger: a full window of recent entries with no normal days.
fn pattern_alert(recent: &[JournalEntry]) -> Option<AlertContext> {
    if recent.len() < RECENT_WINDOW {
        return None;
    }
    if recent
        .iter()
        .any(|e| e.label == MentalHealthLabel::Normal)
    {
        return None;
    }
    let label = most_common_label(recent)?;
    Some(AlertContext::Pattern {
        label,
        entry_count: recent.len(),
    })
}

/// Most frequent label in the window. Ties go to the label seen first,
/// walking newest to oldest.
fn most_common_label(entries: &[JournalEntry]) -> Option<MentalHealthLabel> {
    let mut counts: Vec<(MentalHealthLabel, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(label, _)| *label == entry.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.label, 1)),
        }
    }
    let mut best: Option<(MentalHealthLabel, usize)> = None;
    for &(label, count) in &counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulscript_core::{Role, User};
    use tempfile::tempdir;

    async fn setup_db_with_user() -> (Database, tempfile::TempDir) {
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
            emergency_contacts: Vec::new(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        queries::users::create_user(&db, &user).await.unwrap();
        (db, dir)
    }

    fn make_entry(id: &str, label: MentalHealthLabel, date: &str) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("entry {id}"),
            content: "words".to_string(),
            mood: "low".to_string(),
            label,
            confidence: 0.85,
            date: date.to_string(),
            created_at: date.to_string(),
            updated_at: date.to_string(),
        }
    }

    async fn seed(db: &Database, labels: &[MentalHealthLabel]) {
        for (i, label) in labels.iter().enumerate() {
            let entry = make_entry(
                &format!("e{i}"),
                *label,
                &format!("2026-01-0{}T10:00:00.000Z", i + 1),
            );
            queries::entries::insert_entry(db, &entry).await.unwrap();
        }
    }

    #[tokio::test]
    async fn suicidal_entry_fires_immediate_alert() {
        let (db, _dir) = setup_db_with_user().await;
        let entry = make_entry("e1", MentalHealthLabel::Suicidal, "2026-01-01T10:00:00.000Z");
        queries::entries::insert_entry(&db, &entry).await.unwrap();

        let alerts = AlertEvaluator::new(db.clone()).evaluate(&entry).await;
        assert_eq!(alerts.len(), 1);
        assert!(matches!(alerts[0], AlertContext::Suicidal { .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn too_few_entries_skips_pattern_check() {
        let (db, _dir) = setup_db_with_user().await;
        use MentalHealthLabel::*;
        seed(&db, &[Anxiety, Anxiety, Anxiety, Anxiety]).await;

        let last = make_entry("e3", Anxiety, "2026-01-04T10:00:00.000Z");
        let alerts = AlertEvaluator::new(db.clone()).evaluate(&last).await;
        assert!(alerts.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn normal_entry_in_window_suppresses_pattern_alert() {
        let (db, _dir) = setup_db_with_user().await;
        use MentalHealthLabel::*;
        seed(&db, &[Anxiety, Anxiety, Normal, Anxiety, Anxiety]).await;

        let last = make_entry("e4", Anxiety, "2026-01-05T10:00:00.000Z");
        let alerts = AlertEvaluator::new(db.clone()).evaluate(&last).await;
        assert!(alerts.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concerning_window_fires_pattern_alert_with_most_common_label() {
        let (db, _dir) = setup_db_with_user().await;
        use MentalHealthLabel::*;
        seed(&db, &[Stress, Depression, Depression, Anxiety, Depression]).await;

        let last = make_entry("e4", Depression, "2026-01-05T10:00:00.000Z");
        let alerts = AlertEvaluator::new(db.clone()).evaluate(&last).await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts[0],
            AlertContext::Pattern {
                label: Depression,
                entry_count: 5,
            }
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn suicidal_window_fires_both_alerts() {
        let (db, _dir) = setup_db_with_user().await;
        use MentalHealthLabel::*;
        seed(&db, &[Suicidal, Suicidal, Suicidal, Suicidal, Suicidal]).await;

        let last = make_entry("e4", Suicidal, "2026-01-05T10:00:00.000Z");
        let alerts = AlertEvaluator::new(db.clone()).evaluate(&last).await;
        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], AlertContext::Suicidal { .. }));
        assert!(matches!(alerts[1], AlertContext::Pattern { .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn pattern_alert_refires_as_the_window_slides() {
        let (db, _dir) = setup_db_with_user().await;
        use MentalHealthLabel::*;
        seed(&db, &[Stress, Anxiety, Depression, Stress, Bipolar]).await;
        let evaluator = AlertEvaluator::new(db.clone());

        let fifth = make_entry("e4", Bipolar, "2026-01-05T10:00:00.000Z");
        let alerts = evaluator.evaluate(&fifth).await;
        assert_eq!(
            alerts,
            vec![AlertContext::Pattern {
                label: Stress,
                entry_count: 5,
            }]
        );

        // A sixth entry shifts the window; the check runs against the latest
        // five, not a cached result.
        let sixth = make_entry("e5", Anxiety, "2026-01-06T10:00:00.000Z");
        queries::entries::insert_entry(&db, &sixth).await.unwrap();
        let alerts = evaluator.evaluate(&sixth).await;
        assert_eq!(
            alerts,
            vec![AlertContext::Pattern {
                label: Anxiety,
                entry_count: 5,
            }]
        );
        db.close().await.unwrap();
    }

    #[test]
    fn tie_breaks_on_first_seen_label() {
        use MentalHealthLabel::*;
        let entries: Vec<JournalEntry> = [Stress, Anxiety, Stress, Anxiety, Bipolar]
            .iter()
            .enumerate()
            .map(|(i, label)| make_entry(&format!("e{i}"), *label, "2026-01-01T10:00:00.000Z"))
            .collect();
        assert_eq!(most_common_label(&entries), Some(Stress));
    }
}
