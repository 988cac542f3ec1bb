use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting: {0}")]
    Invalid(String),
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Fatal failures of a single reminder run. Each variant wraps the adapter
/// error unchanged; its causes stay reachable through `source()` instead of
/// being repeated in the message.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("task query failed: {0}")]
    Query(#[source] anyhow::Error),
    #[error("notification delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Run(#[from] RunError),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("anyhow error: {0:#}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    // 0: success
    // 11: config error
    // 20: query failure
    // 21: delivery failure
    // 50: internal/uncategorized
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Logging(_) => 11,
            CliError::Run(RunError::Query(_)) => 20,
            CliError::Run(RunError::Delivery(_)) => 21,
            CliError::Anyhow(_) => 50,
        }
    }
}
