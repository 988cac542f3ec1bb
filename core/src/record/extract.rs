use crate::config::FieldNames;

use super::fallback;
use super::model::{NamedOption, PropertyValue, TaskRecord};

/// Typed view of one record after field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: Option<String>,
    pub title: String,
    pub due: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub assignees: Vec<String>,
    pub url: String,
}

/// Reads the configured properties out of a [`TaskRecord`]. No accessor
/// fails; missing data degrades to the values in [`fallback`].
#[derive(Debug, Clone)]
pub struct Extractor {
    fields: FieldNames,
}

impl Extractor {
    pub fn new(fields: FieldNames) -> Self {
        Self { fields }
    }

    pub fn title(&self, record: &TaskRecord) -> String {
        let text: String = self
            .prop(record, &self.fields.title)
            .and_then(|p| p.title.as_ref())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|t| t.plain_text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            fallback::UNTITLED.to_string()
        } else {
            text
        }
    }

    /// `YYYY-MM-DD` part of the date's start; datetimes are cut to the day.
    pub fn due(&self, record: &TaskRecord) -> Option<String> {
        self.prop(record, &self.fields.due)
            .and_then(|p| p.date.as_ref())
            .and_then(|d| d.start.as_deref())
            .filter(|s| !s.is_empty())
            .map(|s| s.chars().take(10).collect())
    }

    /// Status-typed value first, then select-typed.
    pub fn status(&self, record: &TaskRecord) -> Option<String> {
        let prop = self.prop(record, &self.fields.status)?;
        let named = |opt: &Option<NamedOption>| {
            opt.as_ref()
                .and_then(|o| o.name.as_deref())
                .filter(|n| !n.is_empty())
                .map(str::to_owned)
        };
        named(&prop.status).or_else(|| named(&prop.select))
    }

    pub fn tags(&self, record: &TaskRecord) -> Vec<String> {
        self.prop(record, &self.fields.tags)
            .and_then(|p| p.multi_select.as_ref())
            .map(|opts| {
                opts.iter()
                    .filter_map(|o| o.name.as_deref())
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display names as shown in the task store.
    pub fn assignees(&self, record: &TaskRecord) -> Vec<String> {
        self.prop(record, &self.fields.assignee)
            .and_then(|p| p.people.as_ref())
            .map(|people| {
                people
                    .iter()
                    .filter_map(|p| p.name.as_deref())
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn url(&self, record: &TaskRecord) -> String {
        record
            .url
            .clone()
            .unwrap_or_else(|| fallback::NO_URL.to_string())
    }

    pub fn extract(&self, record: &TaskRecord) -> TaskSummary {
        TaskSummary {
            id: record.id.clone(),
            title: self.title(record),
            due: self.due(record),
            status: self.status(record),
            tags: self.tags(record),
            assignees: self.assignees(record),
            url: self.url(record),
        }
    }

    fn prop<'r>(&self, record: &'r TaskRecord, name: &str) -> Option<&'r PropertyValue> {
        record.property(name)
    }
}
