//! Due-today task reminder: pulls today's records from a task store, drops the
//! finished ones and posts a summary to a chat webhook.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod record;
pub mod sink;
pub mod source;

pub use engine::{Delivery, Reminder, RunOutcome};
pub use error::{CliError, ConfigError, RunError};
