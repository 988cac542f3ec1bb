use std::collections::BTreeSet;

use crate::record::TaskSummary;

/// Drops records whose status is one of the configured "done" labels.
#[derive(Debug, Clone, Default)]
pub struct CompletionFilter {
    done: BTreeSet<String>,
}

impl CompletionFilter {
    pub fn new<I, S>(done: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            done: done.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive match. A missing status is never done.
    pub fn is_done(&self, status: Option<&str>) -> bool {
        status.is_some_and(|s| self.done.contains(s))
    }

    /// Keeps the actionable records in their original order.
    pub fn retain_actionable(&self, records: Vec<TaskSummary>) -> Vec<TaskSummary> {
        records
            .into_iter()
            .filter(|r| {
                let done = self.is_done(r.status.as_deref());
                if done {
                    tracing::debug!(
                        target: "duenotify.filter",
                        stage = "filter.skip_done",
                        record_id = r.id.as_deref().unwrap_or("-"),
                        status = r.status.as_deref().unwrap_or("-")
                    );
                }
                !done
            })
            .collect()
    }
}
