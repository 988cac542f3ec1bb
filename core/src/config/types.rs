use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_NOTION_TOKEN: &str = "NOTION_TOKEN";
pub const ENV_NOTION_DB_ID: &str = "NOTION_DB_ID";
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
pub const ENV_LOG_LEVEL: &str = "DUENOTIFY_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Offset from UTC, in hours, that defines which calendar day is "today".
    #[serde(default = "default_timezone_offset_hours")]
    pub timezone_offset_hours: i32,

    /// Status labels that mark a record as complete. Matched exactly.
    #[serde(default = "default_done_statuses")]
    pub done_statuses: BTreeSet<String>,

    /// First line of every posted message.
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default)]
    pub fields: FieldNames,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_timezone_offset_hours() -> i32 {
    9
}

fn default_done_statuses() -> BTreeSet<String> {
    ["完了", "Done"].iter().map(|s| s.to_string()).collect()
}

fn default_header() -> String {
    "⏰ Due today: incomplete Notion items".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone_offset_hours: default_timezone_offset_hours(),
            done_statuses: default_done_statuses(),
            header: default_header(),
            fields: FieldNames::default(),
            store: StoreConfig::default(),
            notify: NotifyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Checks that every required setting is present. `require_webhook` is
    /// false for dry runs, which never post.
    pub fn validate(&self, require_webhook: bool) -> Result<(), ConfigError> {
        if self.store.api_token.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_NOTION_TOKEN));
        }
        if self.store.database_id.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_NOTION_DB_ID));
        }
        if require_webhook {
            if self.notify.webhook_url.trim().is_empty() {
                return Err(ConfigError::Missing(ENV_SLACK_WEBHOOK_URL));
            }
            check_http_url("notify.webhook_url", &self.notify.webhook_url)?;
        }
        check_http_url("store.base_url", &self.store.base_url)?;
        if !(-12..=14).contains(&self.timezone_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "timezone_offset_hours out of range: {}",
                self.timezone_offset_hours
            )));
        }
        if self.fields.due.trim().is_empty() {
            return Err(ConfigError::Invalid("fields.due must not be empty".to_string()));
        }
        Ok(())
    }
}

/// The value itself is left out of the error; webhook urls carry a secret.
fn check_http_url(setting: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value.trim())
        .map_err(|e| ConfigError::Invalid(format!("{setting} is not a valid url: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{setting} must use http or https, got {other}"
        ))),
    }
}

/// Property names of the task database. Defaults match the Japanese-labelled
/// workspace the reminder was first written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_title_field")]
    pub title: String,
    #[serde(default = "default_tags_field")]
    pub tags: String,
    #[serde(default = "default_status_field")]
    pub status: String,
    #[serde(default = "default_assignee_field")]
    pub assignee: String,
    #[serde(default = "default_due_field")]
    pub due: String,
}

fn default_title_field() -> String {
    "名前".to_string()
}

fn default_tags_field() -> String {
    "タグ".to_string()
}

fn default_status_field() -> String {
    "ステータス".to_string()
}

fn default_assignee_field() -> String {
    "割り振り".to_string()
}

fn default_due_field() -> String {
    "期限".to_string()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            title: default_title_field(),
            tags: default_tags_field(),
            status: default_status_field(),
            assignee: default_assignee_field(),
            due: default_due_field(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_base_url")]
    pub base_url: String,

    /// Integration token. Usually supplied through `NOTION_TOKEN`.
    #[serde(default)]
    pub api_token: String,

    #[serde(default)]
    pub database_id: String,

    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Single page only; values above 100 are clamped by the client.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_store_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            api_token: String::new(),
            database_id: String::new(),
            notion_version: default_notion_version(),
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "duenotify_plugins=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
