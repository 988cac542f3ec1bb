use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::{
    AppConfig, ENV_LOG_LEVEL, ENV_NOTION_DB_ID, ENV_NOTION_TOKEN, ENV_SLACK_WEBHOOK_URL,
};

pub const LOCAL_CONFIG_FILE: &str = "duenotify.toml";

/// `<config_dir>/duenotify/config.toml`, e.g. `~/.config/duenotify/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("duenotify").join("config.toml"))
}

/// Resolves configuration from file and process environment.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(explicit, |key| std::env::var(key).ok())
}

pub fn load_with_env<F>(explicit: Option<&Path>, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = resolve_config_path(explicit, Path::new("."), user_config_path());
    load_from(path.as_deref(), env)
}

/// Picks the config file to read.
/// Priority 1: --config (returned even if it does not exist)
/// Priority 2: `<cwd>/duenotify.toml`
/// Priority 3: user config dir
/// None: built-in defaults
pub fn resolve_config_path(
    explicit: Option<&Path>,
    cwd: &Path,
    user_config: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    user_config.filter(|p| p.exists())
}

/// Reads `path` (or starts from defaults) and applies env overrides.
pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match path {
        Some(p) => read_file(p)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut cfg, env);
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Environment variables win over file values. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_NOTION_TOKEN) {
        cfg.store.api_token = v;
    }
    if let Some(v) = get(ENV_NOTION_DB_ID) {
        cfg.store.database_id = v;
    }
    if let Some(v) = get(ENV_SLACK_WEBHOOK_URL) {
        cfg.notify.webhook_url = v;
    }
    if let Some(v) = get(ENV_LOG_LEVEL) {
        cfg.logging.level = v;
    }
}
