use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Posts today's incomplete tasks to the configured webhook.
#[derive(Parser, Debug)]
#[command(name = "duenotify", version)]
pub struct Args {
    /// Config file. Defaults to ./duenotify.toml, then the user config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Query and format, print the message, do not post it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Reference day (YYYY-MM-DD) instead of today in the configured offset.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}
