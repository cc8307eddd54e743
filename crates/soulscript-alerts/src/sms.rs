// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS alerts via a Twilio-compatible HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use soulscript_config::SmsConfig;
use soulscript_core::{OutboundSms, SmsGateway, SoulscriptError};
use tracing::debug;

/// SMS gateway speaking the Twilio Messages API.
pub struct HttpSmsGateway {
    client: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl HttpSmsGateway {
    pub fn new(config: &SmsConfig) -> Result<Self, SoulscriptError> {
        let account_sid = config
            .account_sid
            .clone()
            .ok_or_else(|| SoulscriptError::Config("sms.account_sid is required".to_string()))?;
        let auth_token = config
            .auth_token
            .clone()
            .ok_or_else(|| SoulscriptError::Config("sms.auth_token is required".to_string()))?;
        let from_number = config
            .from_number
            .clone()
            .ok_or_else(|| SoulscriptError::Config("sms.from_number is required".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SoulscriptError::Notify {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
            from_number,
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send(&self, sms: &OutboundSms) -> Result<(), SoulscriptError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        );
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", sms.to.as_str()),
                ("From", self.from_number.as_str()),
                ("Body", sms.message.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SoulscriptError::Notify {
                message: format!("SMS request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SoulscriptError::Notify {
                message: format!("SMS provider returned {status}: {body}"),
                source: None,
            });
        }
        debug!(to = %sms.to, "alert SMS sent");
        Ok(())
    }
}
