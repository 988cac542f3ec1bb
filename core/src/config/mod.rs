mod load;
mod types;

pub use load::{
    apply_env_overrides, load, load_from, load_with_env, resolve_config_path, user_config_path,
    LOCAL_CONFIG_FILE,
};
pub use types::{
    AppConfig, FieldNames, LoggingConfig, NotifyConfig, StoreConfig, ENV_LOG_LEVEL,
    ENV_NOTION_DB_ID, ENV_NOTION_TOKEN, ENV_SLACK_WEBHOOK_URL,
};
