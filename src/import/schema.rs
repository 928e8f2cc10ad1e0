use serde_json::{json, Value};
use std::sync::LazyLock;

/// Shape of one imported spreadsheet row. Sheets export numbers as either
/// JSON numbers or numeric text, so both are allowed for counters.
pub static ROW_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    let numeric = json!({ "type": ["number", "string", "null"] });
    let label = json!({ "type": ["string", "number", "null"] });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "month": label,
            "country": { "type": ["string", "null"] },
            "batch": label,
            "stage": { "type": ["string", "null"] },
            "program": { "type": ["string", "null"] },
            "status": { "type": ["string", "null"] },
            "progress": numeric,
            "participants": numeric,
            "training": numeric,
            "workshops": numeric,
            "completion": numeric,
            "stage1": numeric,
            "stage2": numeric,
            "stage3": numeric,
            "stage4": numeric,
            "totalProgress": numeric
        }
    })
});
