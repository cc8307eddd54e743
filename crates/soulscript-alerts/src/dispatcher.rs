// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatch to emergency contacts.
//!
//! Dispatch is best-effort: a failed send is logged and the remaining
//! contacts are still attempted. An unconfigured channel drops that leg of
//! the notification with a warning.

use std::sync::Arc;

use soulscript_core::{
    ContactSource, EmergencyContact, Mailer, OutboundEmail, OutboundSms, SmsGateway,
    SoulscriptError,
};
use soulscript_storage::{Database, queries};
use tracing::{info, warn};

use crate::types::{AlertContext, DispatchOutcome};

/// Sends alert notifications to a user's emergency contacts.
pub struct AlertDispatcher {
    db: Database,
    sources: Vec<Arc<dyn ContactSource>>,
    mailer: Option<Arc<dyn Mailer>>,
    sms: Option<Arc<dyn SmsGateway>>,
}

impl AlertDispatcher {
    pub fn new(
        db: Database,
        sources: Vec<Arc<dyn ContactSource>>,
        mailer: Option<Arc<dyn Mailer>>,
        sms: Option<Arc<dyn SmsGateway>>,
    ) -> Self {
        Self {
            db,
            sources,
            mailer,
            sms,
        }
    }

    /// Notify all of the user's emergency contacts about `ctx`.
    ///
    /// Never returns an error: a user with no contacts, or a run where every
    /// send fails, yields `{success: false, notified: 0}`.
    pub async fn notify(&self, user_id: &str, ctx: &AlertContext) -> DispatchOutcome {
        let user = match queries::users::get_user(&self.db, user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(user_id, "alert target user not found");
                return DispatchOutcome {
                    success: false,
                    notified: 0,
                };
            }
            Err(e) => {
                warn!(error = %e, user_id, "failed to load alert target user");
                return DispatchOutcome {
                    success: false,
                    notified: 0,
                };
            }
        };

        let contacts = self.resolve_contacts(user_id).await;
        if contacts.is_empty() {
            info!(user_id, "no emergency contacts found, skipping alert");
            return DispatchOutcome {
                success: false,
                notified: 0,
            };
        }

        let subject = ctx.subject();
        let message = ctx.message(&user.name);
        if let AlertContext::Suicidal { entry_title, .. } = ctx {
            info!(user_id, entry_title = %entry_title, "dispatching immediate-risk alert");
        }

        let mut notified = 0;
        for contact in &contacts {
            if !is_notifiable(contact) {
                continue;
            }

            if let Some(email) = contact.email.as_deref().filter(|s| !s.is_empty()) {
                match self.send_email(email, subject, &message).await {
                    Ok(()) => notified += 1,
                    Err(e) => {
                        warn!(error = %e, contact = %contact.contact_name, "alert email failed");
                    }
                }
            }

            if let Some(phone) = contact.phone_number.as_deref().filter(|s| !s.is_empty()) {
                match self.send_sms(phone, &message).await {
                    Ok(()) => notified += 1,
                    Err(e) => {
                        warn!(error = %e, contact = %contact.contact_name, "alert SMS failed");
                    }
                }
            }
        }

        info!(user_id, notified, "alert dispatch finished");
        DispatchOutcome {
            success: notified > 0,
            notified,
        }
    }

    /// Walk the source chain and use the first source with any contacts.
    async fn resolve_contacts(&self, user_id: &str) -> Vec<EmergencyContact> {
        for source in &self.sources {
            match source.contacts_for(user_id).await {
                Ok(contacts) if !contacts.is_empty() => return contacts,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, source = source.name(), "contact source failed");
                }
            }
        }
        Vec::new()
    }

    async fn send_email(&self, to: &str, subject: &str, text: &str) -> Result<(), SoulscriptError> {
        let Some(mailer) = &self.mailer else {
            warn!(to, "email channel not configured, dropping alert email");
            return Err(SoulscriptError::Notify {
                message: "email channel not configured".to_string(),
                source: None,
            });
        };
        mailer
            .send(&OutboundEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                text: text.to_string(),
            })
            .await
    }

    async fn send_sms(&self, to: &str, message: &str) -> Result<(), SoulscriptError> {
        let Some(sms) = &self.sms else {
            warn!(to, "SMS channel not configured, dropping alert SMS");
            return Err(SoulscriptError::Notify {
                message: "SMS channel not configured".to_string(),
                source: None,
            });
        };
        sms.send(&OutboundSms {
            to: to.to_string(),
            message: message.to_string(),
        })
        .await
    }
}

/// A contact needs a name and at least one channel to be notifiable.
fn is_notifiable(contact: &EmergencyContact) -> bool {
    let has_email = contact.email.as_deref().is_some_and(|s| !s.is_empty());
    let has_phone = contact.phone_number.as_deref().is_some_and(|s| !s.is_empty());
    !contact.contact_name.is_empty() && (has_email || has_phone)
}
