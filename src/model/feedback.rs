use super::{ATTACHMENT_URL_FIELD, ERS_FILE_NAME_FIELD};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// One feedback record exactly as the API returned it, attachments and
/// navigation links included. Key order is the order of the response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFeedback(IndexMap<String, Value>);

impl RawFeedback {
    pub fn into_fields(self) -> IndexMap<String, Value> {
        self.0
    }
}

impl From<Value> for RawFeedback {
    /// Non-object values produce an empty record.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map.into_iter().collect()),
            _ => Self::default(),
        }
    }
}

/// A flat, normalized feedback record.
///
/// Always carries `attachmentUrl` and `ersFileName` (possibly null) and
/// never carries the attachment list or navigation links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeedbackRecord {
    fields: IndexMap<String, Value>,
}

impl FeedbackRecord {
    /// Only the normalizer builds records, so the flat invariant holds.
    pub(super) fn from_normalized(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The record's `id`, when it is an integer.
    pub fn id(&self) -> Option<i64> {
        self.fields.get("id").and_then(Value::as_i64)
    }

    pub fn attachment_url(&self) -> Option<&str> {
        self.fields.get(ATTACHMENT_URL_FIELD).and_then(Value::as_str)
    }

    pub fn ers_file_name(&self) -> Option<&str> {
        self.fields.get(ERS_FILE_NAME_FIELD).and_then(Value::as_str)
    }

    /// Values in the given column order; missing keys read as null.
    pub fn values_in<'a>(&'a self, columns: &'a [&str]) -> impl Iterator<Item = &'a Value> + 'a {
        columns
            .iter()
            .map(move |column| self.fields.get(*column).unwrap_or(&NULL))
    }

    /// Converts back into the raw shape, e.g. to feed through `normalize` again.
    pub fn into_raw(self) -> RawFeedback {
        RawFeedback(self.fields)
    }
}
