//! Wires configuration, adapters and the reminder engine for one run.
use chrono::NaiveDate;
use duenotify_core::clock;
use duenotify_core::config::AppConfig;
use duenotify_core::{CliError, Reminder, RunOutcome};
use duenotify_plugins::factory;

use crate::commands::cli::Args;

pub fn reference_date(cfg: &AppConfig, args: &Args) -> Result<NaiveDate, CliError> {
    if let Some(date) = args.date {
        return Ok(date);
    }
    let offset = clock::fixed_offset(cfg.timezone_offset_hours)?;
    Ok(clock::today(offset))
}

#[tracing::instrument(name = "cli.run_app", skip(args, cfg), fields(run_id = %uuid::Uuid::new_v4()))]
pub async fn run_app(args: &Args, cfg: &AppConfig) -> Result<RunOutcome, CliError> {
    cfg.validate(!args.dry_run)?;

    let today = reference_date(cfg, args)?;
    tracing::info!(
        date = %today,
        dry_run = args.dry_run,
        done_statuses = cfg.done_statuses.len(),
        "reminder run started"
    );

    let source = factory::build_source(cfg)?;
    let delivery = factory::build_delivery(cfg, args.dry_run)?;
    let reminder = Reminder::new(cfg, source, delivery);

    Ok(reminder.run_once(today).await?)
}

/// Text for stdout: the summary line, plus the message on dry runs.
pub fn render_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Previewed { message, .. } => format!("{}\n{}", outcome.summary(), message),
        _ => outcome.summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use duenotify_core::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_date_wins() {
        let args = Args::try_parse_from(["duenotify", "--date", "2024-05-01"]).unwrap();
        let date = reference_date(&AppConfig::default(), &args).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let args = Args::try_parse_from(["duenotify"]).unwrap();
        let err = run_app(&args, &AppConfig::default()).await.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Missing("NOTION_TOKEN"))));
        assert_eq!(err.exit_code(), 11);
    }

    #[tokio::test]
    async fn malformed_webhook_exits_as_config_error() {
        let args = Args::try_parse_from(["duenotify"]).unwrap();
        let mut cfg = AppConfig::default();
        cfg.store.api_token = "t".to_string();
        cfg.store.database_id = "d".to_string();
        cfg.notify.webhook_url = "hooks.slack.com/services/T0/B0/secret".to_string();

        let err = run_app(&args, &cfg).await.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
        assert_eq!(err.exit_code(), 11);
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn dry_run_output_includes_message() {
        let out = render_outcome(&RunOutcome::Previewed {
            date: "2024-05-01".to_string(),
            count: 1,
            message: "Header\n• 2024-05-01 / -\n  (untitled)\n  ".to_string(),
        });
        assert_eq!(out, "Dry run: 1 items.\nHeader\n• 2024-05-01 / -\n  (untitled)\n  ");
        assert_eq!(
            render_outcome(&RunOutcome::Posted {
                date: "2024-05-01".to_string(),
                count: 2
            }),
            "Posted 2 items."
        );
    }
}
