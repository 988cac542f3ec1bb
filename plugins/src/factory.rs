use anyhow::Result;

use duenotify_core::config::AppConfig;
use duenotify_core::sink::NotificationSink;
use duenotify_core::source::TaskSource;
use duenotify_core::Delivery;

use crate::notify::SlackWebhookSink;
use crate::store::NotionTaskSource;

pub fn build_source(cfg: &AppConfig) -> Result<Box<dyn TaskSource>> {
    Ok(Box::new(NotionTaskSource::new(
        &cfg.store,
        cfg.fields.due.clone(),
    )?))
}

pub fn build_sink(cfg: &AppConfig) -> Result<Box<dyn NotificationSink>> {
    Ok(Box::new(SlackWebhookSink::new(&cfg.notify)?))
}

/// Dry runs never build a sink, so a missing webhook url is not an error there.
pub fn build_delivery(cfg: &AppConfig, dry_run: bool) -> Result<Delivery> {
    if dry_run {
        return Ok(Delivery::DryRun);
    }
    Ok(Delivery::Post(build_sink(cfg)?))
}
