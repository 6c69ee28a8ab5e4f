use crate::ipc::error::{err, ok};
use crate::ipc::types::Request;
use serde_json::json;
use uuid::Uuid;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{} must not be empty", key),
            None,
        )),
        None => Err(err(&req.id, "bad_params", format!("missing {}", key), None)),
    }
}

/// Missing, null and blank all read as `None`.
pub fn optional_str(req: &Request, key: &str) -> Result<Option<String>, serde_json::Value> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let t = s.trim();
            Ok((!t.is_empty()).then(|| t.to_string()))
        }
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{} must be a string or null", key),
            None,
        )),
    }
}

/// Search text exactly as typed; only lowercased later. Missing or null is "".
pub fn search_query(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{} must be a string or null", key),
            None,
        )),
    }
}

pub fn empty_state(title: &str, description: impl Into<String>) -> serde_json::Value {
    json!({
        "title": title,
        "description": description.into(),
    })
}

/// Success reply for a write the daemon acknowledges but never applies.
/// The store is read-only; the UI shows `notification` and moves on.
pub fn simulated(
    req: &Request,
    title: &str,
    description: impl Into<String>,
    provisional_id: bool,
    echo: serde_json::Value,
) -> serde_json::Value {
    let mut result = json!({
        "simulated": true,
        "persisted": false,
        "notification": {
            "title": title,
            "description": description.into(),
        },
        "echo": echo,
    });
    if provisional_id {
        result["provisionalId"] = json!(Uuid::new_v4().to_string());
    }
    ok(&req.id, result)
}

/// Write aimed at an id the store does not know. Still a simulated success,
/// but with no notification and an `emptyState` naming what was missing.
pub fn simulated_unresolved(
    req: &Request,
    title: &str,
    description: impl Into<String>,
) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "simulated": true,
            "persisted": false,
            "notification": null,
            "echo": req.params.clone(),
            "emptyState": empty_state(title, description),
        }),
    )
}
