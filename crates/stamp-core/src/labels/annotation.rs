use serde_json::Value;
use stamp_model::Labels;
use tracing::{debug, warn};

/// Caller-tier labels carried by a query annotation.
///
/// A session may wrap its statements with an annotation: a JSON object whose
/// entries become caller labels. Strings are kept, numbers and booleans are
/// stringified; `null`, arrays and nested objects are skipped. Anything that is
/// not a JSON object yields an empty map.
pub fn caller_labels_from_annotation(raw: &str) -> Labels {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "query annotation is not valid JSON; no caller labels");
            return Labels::new();
        }
    };
    let Value::Object(obj) = parsed else {
        warn!("query annotation is not a JSON object; no caller labels");
        return Labels::new();
    };

    let mut labels = Labels::new();
    for (key, value) in obj {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                debug!(key = %key, kind = ?other, "skipping non-scalar annotation entry");
                continue;
            }
        };
        labels.insert(key, value);
    }
    labels
}
