//! Collapses a raw record's attachment list into two flat fields.

use super::{
    FeedbackRecord, RawFeedback, ATTACHMENTS_FIELD, ATTACHMENT_URL_FIELD, ERS_FILE_NAME_FIELD,
    NAVIGATION_FIELDS,
};
use serde_json::Value;

/// Normalizes one raw record into a flat `FeedbackRecord`.
///
/// Only the first attachment is kept. Its `documentId` is appended to
/// `download_base` to form `attachmentUrl`; its `ersFileName` is copied.
/// An empty list, or a falsy `documentId`, yields null for both fields.
/// A record with no `attachments` key keeps any derived fields it already
/// has, which makes normalizing a normalized record a no-op.
pub fn normalize(raw: RawFeedback, download_base: &str) -> FeedbackRecord {
    let mut fields = raw.into_fields();

    let attachments = fields.shift_remove(ATTACHMENTS_FIELD);
    for key in NAVIGATION_FIELDS {
        fields.shift_remove(*key);
    }

    let (url, file_name) = match attachments {
        Some(list) => match first_attachment(&list, download_base) {
            Some(derived) => derived,
            None => (Value::Null, Value::Null),
        },
        None => (
            fields.get(ATTACHMENT_URL_FIELD).cloned().unwrap_or(Value::Null),
            fields.get(ERS_FILE_NAME_FIELD).cloned().unwrap_or(Value::Null),
        ),
    };

    fields.insert(ATTACHMENT_URL_FIELD.to_string(), url);
    fields.insert(ERS_FILE_NAME_FIELD.to_string(), file_name);

    FeedbackRecord::from_normalized(fields)
}

/// Derives `(attachmentUrl, ersFileName)` from the first list entry.
fn first_attachment(list: &Value, download_base: &str) -> Option<(Value, Value)> {
    let first = list.as_array()?.first()?;
    let document_id = first.get("documentId").filter(|id| is_truthy(id))?;

    let id_text = match document_id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let file_name = first.get("ersFileName").cloned().unwrap_or(Value::Null);

    Some((Value::String(format!("{download_base}{id_text}")), file_name))
}

/// JSON truthiness: null, false, 0, "" and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const BASE: &str = "https://example.org/download/";

    fn raw(value: Value) -> RawFeedback {
        RawFeedback::from(value)
    }

    #[test]
    fn first_attachment_becomes_url_and_file_name() {
        let record = normalize(
            raw(json!({
                "id": 1,
                "feedback": "Support",
                "attachments": [
                    {"documentId": "A1", "ersFileName": "doc.pdf"},
                    {"documentId": "A2", "ersFileName": "other.pdf"}
                ],
                "_links": {"self": {"href": "https://example.org/1"}}
            })),
            BASE,
        );

        assert_eq!(record.attachment_url(), Some("https://example.org/download/A1"));
        assert_eq!(record.ers_file_name(), Some("doc.pdf"));
        assert!(!record.contains_key("attachments"));
        assert!(!record.contains_key("_links"));
        assert_eq!(record.get("feedback"), Some(&json!("Support")));
    }

    #[test]
    fn missing_or_empty_attachments_yield_nulls() {
        for input in [
            json!({"id": 2}),
            json!({"id": 2, "attachments": []}),
            json!({"id": 2, "attachments": null}),
        ] {
            let record = normalize(raw(input), BASE);
            assert_eq!(record.get(ATTACHMENT_URL_FIELD), Some(&Value::Null));
            assert_eq!(record.get(ERS_FILE_NAME_FIELD), Some(&Value::Null));
            assert!(!record.contains_key("attachments"));
        }
    }

    #[test]
    fn falsy_document_id_yields_nulls() {
        for document_id in [json!(""), json!(null), json!(0), json!(false)] {
            let record = normalize(
                raw(json!({
                    "id": 3,
                    "attachments": [{"documentId": document_id, "ersFileName": "ignored.pdf"}]
                })),
                BASE,
            );
            assert_eq!(record.attachment_url(), None);
            assert_eq!(record.get(ERS_FILE_NAME_FIELD), Some(&Value::Null));
        }

        let record = normalize(
            raw(json!({"id": 3, "attachments": [{"ersFileName": "orphan.pdf"}]})),
            BASE,
        );
        assert_eq!(record.get(ATTACHMENT_URL_FIELD), Some(&Value::Null));
    }

    #[test]
    fn numeric_document_id_is_rendered_as_text() {
        let record = normalize(
            raw(json!({"id": 4, "attachments": [{"documentId": 9001}]})),
            BASE,
        );
        assert_eq!(record.attachment_url(), Some("https://example.org/download/9001"));
        assert_eq!(record.get(ERS_FILE_NAME_FIELD), Some(&Value::Null));
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            json!({"id": 5, "attachments": [{"documentId": "X", "ersFileName": "x.pdf"}]}),
            json!({"id": 6, "attachments": []}),
            json!({"id": 7, "_links": {}}),
        ];

        for input in inputs {
            let once = normalize(raw(input), BASE);
            let twice = normalize(once.clone().into_raw(), BASE);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn source_key_order_is_preserved() {
        let body = r#"{"id": 1, "language": "EN", "attachments": [], "country": "BEL", "_links": {}}"#;
        let record = normalize(serde_json::from_str(body).unwrap(), BASE);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(
            keys,
            vec!["id", "language", "country", "attachmentUrl", "ersFileName"]
        );
    }

    #[test]
    fn truthiness_follows_json_semantics() {
        assert!(is_truthy(&json!("A1")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([0])));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!({})));
    }
}
