use async_trait::async_trait;
use chrono::NaiveDate;

use crate::record::TaskRecord;

/// A store that can be asked for the records due on a given day.
#[async_trait]
pub trait TaskSource: Send + Sync {
    fn name(&self) -> &str;
    /// One bounded page of records whose due date equals `date`.
    async fn query_due(&self, date: NaiveDate) -> anyhow::Result<Vec<TaskRecord>>;
}
