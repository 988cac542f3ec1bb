//! One reminder run: query, extract, filter, format, deliver.

use chrono::NaiveDate;

use crate::clock::iso_date;
use crate::config::AppConfig;
use crate::error::RunError;
use crate::filter::CompletionFilter;
use crate::format::format_message;
use crate::record::{Extractor, TaskSummary};
use crate::sink::NotificationSink;
use crate::source::TaskSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing actionable; no message was sent.
    NoTargets { date: String },
    Posted { date: String, count: usize },
    /// Dry run: the message that would have been posted.
    Previewed {
        date: String,
        count: usize,
        message: String,
    },
}

impl RunOutcome {
    /// One-line summary printed on stdout.
    pub fn summary(&self) -> String {
        match self {
            RunOutcome::NoTargets { .. } => "No targets.".to_string(),
            RunOutcome::Posted { count, .. } => format!("Posted {count} items."),
            RunOutcome::Previewed { count, .. } => format!("Dry run: {count} items."),
        }
    }
}

pub enum Delivery {
    Post(Box<dyn NotificationSink>),
    DryRun,
}

pub struct Reminder {
    source: Box<dyn TaskSource>,
    delivery: Delivery,
    extractor: Extractor,
    filter: CompletionFilter,
    header: String,
}

impl Reminder {
    pub fn new(cfg: &AppConfig, source: Box<dyn TaskSource>, delivery: Delivery) -> Self {
        Self {
            source,
            delivery,
            extractor: Extractor::new(cfg.fields.clone()),
            filter: CompletionFilter::new(cfg.done_statuses.iter().cloned()),
            header: cfg.header.clone(),
        }
    }

    /// Extracted, actionable records for `today`, in store order.
    pub async fn collect(&self, today: NaiveDate) -> Result<Vec<TaskSummary>, RunError> {
        let records = self
            .source
            .query_due(today)
            .await
            .map_err(RunError::Query)?;
        let fetched = records.len();

        let summaries = records.iter().map(|r| self.extractor.extract(r)).collect();
        let targets = self.filter.retain_actionable(summaries);

        tracing::info!(
            target: "duenotify.engine",
            stage = "engine.collect",
            source = self.source.name(),
            date = %today,
            fetched = fetched,
            actionable = targets.len()
        );
        Ok(targets)
    }

    pub async fn run_once(&self, today: NaiveDate) -> Result<RunOutcome, RunError> {
        let date = iso_date(today);
        let targets = self.collect(today).await?;

        if targets.is_empty() {
            tracing::info!(target: "duenotify.engine", stage = "engine.no_targets", date = %date);
            return Ok(RunOutcome::NoTargets { date });
        }

        let message = format_message(&self.header, &targets, &date);
        let count = targets.len();

        match &self.delivery {
            Delivery::DryRun => {
                tracing::info!(
                    target: "duenotify.engine",
                    stage = "engine.dry_run",
                    count = count
                );
                Ok(RunOutcome::Previewed {
                    date,
                    count,
                    message,
                })
            }
            Delivery::Post(sink) => {
                sink.deliver(&message).await.map_err(RunError::Delivery)?;
                tracing::info!(
                    target: "duenotify.engine",
                    stage = "engine.posted",
                    sink = sink.name(),
                    count = count
                );
                Ok(RunOutcome::Posted { date, count })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_match_cli_output() {
        let date = "2024-05-01".to_string();
        assert_eq!(
            RunOutcome::NoTargets { date: date.clone() }.summary(),
            "No targets."
        );
        assert_eq!(
            RunOutcome::Posted {
                date: date.clone(),
                count: 3
            }
            .summary(),
            "Posted 3 items."
        );
        assert_eq!(
            RunOutcome::Previewed {
                date,
                count: 1,
                message: String::new()
            }
            .summary(),
            "Dry run: 1 items."
        );
    }
}
