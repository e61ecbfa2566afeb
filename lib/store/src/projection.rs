//! Projection of raw backing-store documents into [`UserRecord`]s.
//!
//! The backing store is schemaless: ids arrive as plain strings or
//! extended-JSON `{"$oid": ...}` objects, skill entries as plain strings
//! or `{"name": ...}` objects. Absent multi-valued fields project to
//! empty sets; absent scalars stay unset so that fitting can detect and
//! reject them instead of training on silent zeros.

use peermatch_core::{UserProfile, UserRecord};
use serde_json::Value;
use tracing::warn;

/// Project one raw document into a [`UserRecord`].
///
/// Returns `None` (with a warning) when the document carries no usable
/// id.
#[must_use]
pub fn project_user(doc: &Value) -> Option<UserRecord> {
    let Some(id) = document_id(doc) else {
        warn!("skipping user document without an id");
        return None;
    };

    let profile = UserProfile {
        education_level: doc
            .get("educationLevel")
            .and_then(Value::as_str)
            .map(str::to_owned),
        skills_can_teach: label_list(doc.get("skillsCanTeach")),
        badges: label_list(doc.get("badges")),
        points: doc.get("points").and_then(Value::as_f64),
        sessions_completed: doc.get("sessionsCompleted").and_then(Value::as_f64),
        questions_answered: doc.get("questionsAnswered").and_then(Value::as_f64),
        rating: doc.get("rating").and_then(Value::as_f64),
    };

    Some(UserRecord::new(id, profile))
}

fn document_id(doc: &Value) -> Option<String> {
    match doc.get("_id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(map)) => map.get("$oid").and_then(Value::as_str).map(str::to_owned),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Collect a label array; entries may be `"Math"` or `{"name": "Math"}`.
fn label_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(map) => {
                        map.get("name").and_then(Value::as_str).map(str::to_owned)
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
