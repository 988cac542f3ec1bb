use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use duenotify_core::config::NotifyConfig;
use duenotify_core::sink::NotificationSink;

use crate::http::{build_client, ensure_success, redact_url, ApiHttpError};

const SERVICE: &str = "slack";

#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage<'a> {
    pub text: &'a str,
}

/// Posts plain text to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackWebhookSink {
    http: reqwest::Client,
    webhook_url: reqwest::Url,
}

impl SlackWebhookSink {
    pub fn new(cfg: &NotifyConfig) -> Result<Self> {
        let http = build_client(cfg.timeout_ms)?;
        let webhook_url = reqwest::Url::parse(cfg.webhook_url.trim())
            .map_err(|e| anyhow::anyhow!("invalid webhook url: {e}"))?;
        Ok(Self { http, webhook_url })
    }
}

#[async_trait]
impl NotificationSink for SlackWebhookSink {
    fn name(&self) -> &str {
        "slack_webhook"
    }

    async fn deliver(&self, text: &str) -> Result<()> {
        let shown = redact_url(&self.webhook_url);
        tracing::debug!(
            target: "duenotify.notify",
            stage = "notify.slack.post.in",
            host = %shown,
            text_len = text.len()
        );
        let resp = self
            .http
            .post(self.webhook_url.clone())
            .json(&WebhookMessage { text })
            .send()
            .await
            .map_err(|err| ApiHttpError::from_reqwest(SERVICE, err, shown.clone()))?;
        let status = resp.status();
        ensure_success(SERVICE, resp, shown).await?;
        tracing::debug!(
            target: "duenotify.notify",
            stage = "notify.slack.post.out",
            status = %status
        );
        Ok(())
    }
}
