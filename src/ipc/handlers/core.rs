use crate::ipc::error::ok;
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = &state.store;
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "seedSource": store.source().describe(),
            "studentCount": store.total_students(),
            "courseCount": store.total_courses(),
            "attendanceRecordCount": store.attendance_records().len(),
        }),
    )
}

/// Maps an in-app path to the view the UI should mount. Student and course
/// detail routes fall back to their list view when the id does not resolve.
fn resolve_route(state: &AppState, path: &str) -> serde_json::Value {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => json!({ "view": "dashboard", "params": {} }),
        ["students"] => json!({ "view": "students", "params": {} }),
        ["students", id] => match state.store.student_by_id(id) {
            Some(s) => json!({ "view": "studentDetail", "params": { "studentId": s.id } }),
            None => json!({ "view": "students", "params": {} }),
        },
        ["courses"] => json!({ "view": "courses", "params": {} }),
        ["courses", id] => match state.store.course_by_id(id) {
            Some(c) => json!({ "view": "courseDetail", "params": { "courseId": c.id } }),
            None => json!({ "view": "courses", "params": {} }),
        },
        ["attendance"] => json!({ "view": "attendance", "params": {} }),
        ["grades"] => json!({ "view": "grades", "params": {} }),
        _ => json!({ "view": "notFound", "params": { "path": path } }),
    }
}

fn handle_navigate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    ok(&req.id, resolve_route(state, &path))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "navigate" => Some(handle_navigate(state, req)),
        _ => None,
    }
}
