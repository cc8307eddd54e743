// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP alert mail via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use soulscript_config::EmailConfig;
use soulscript_core::{Mailer, OutboundEmail, SoulscriptError};
use tracing::debug;

/// Alert mailer backed by an async SMTP relay with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, SoulscriptError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| SoulscriptError::Config("email.smtp_host is required".to_string()))?;
        let from = config
            .from
            .as_deref()
            .ok_or_else(|| SoulscriptError::Config("email.from is required".to_string()))?
            .parse::<Mailbox>()
            .map_err(|e| SoulscriptError::Config(format!("invalid email.from address: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| SoulscriptError::Notify {
                message: format!("failed to build SMTP transport: {e}"),
                source: Some(Box::new(e)),
            })?
            .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), SoulscriptError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| SoulscriptError::Notify {
                message: format!("invalid recipient address {:?}: {e}", email.to),
                source: Some(Box::new(e)),
            })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text.clone())
            .map_err(|e| SoulscriptError::Notify {
                message: format!("failed to build email: {e}"),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| SoulscriptError::Notify {
                message: format!("SMTP send failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(to = %email.to, "alert email sent");
        Ok(())
    }
}
