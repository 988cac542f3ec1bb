use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// One page of the task database as returned by a query.
///
/// Only the property shapes the reminder reads are modelled. Everything else
/// in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRecord {
    pub id: Option<String>,
    pub url: Option<String>,
    pub properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    #[serde(default)]
    pub date: Option<DateValue>,
    #[serde(default)]
    pub status: Option<NamedOption>,
    #[serde(default)]
    pub select: Option<NamedOption>,
    #[serde(default)]
    pub multi_select: Option<Vec<NamedOption>>,
    #[serde(default)]
    pub people: Option<Vec<Person>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamedOption {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
}

impl TaskRecord {
    /// Decodes a raw page property by property. A property whose shape does
    /// not match is dropped, so one bad field never discards the record.
    pub fn from_value(value: &Value) -> Self {
        let id = value.get("id").and_then(Value::as_str).map(str::to_owned);
        let url = value.get("url").and_then(Value::as_str).map(str::to_owned);

        let mut properties = HashMap::new();
        if let Some(props) = value.get("properties").and_then(Value::as_object) {
            for (name, raw) in props {
                if raw.is_null() {
                    continue;
                }
                match PropertyValue::deserialize(raw) {
                    Ok(prop) => {
                        properties.insert(name.clone(), prop);
                    }
                    Err(err) => {
                        tracing::warn!(
                            target: "duenotify.record",
                            stage = "record.property.skip",
                            record_id = id.as_deref().unwrap_or("-"),
                            property = %name,
                            error = %err
                        );
                    }
                }
            }
        }

        Self {
            id,
            url,
            properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}
