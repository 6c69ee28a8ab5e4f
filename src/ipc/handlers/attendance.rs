use crate::calc;
use crate::filter;
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::students::course_not_found;
use crate::ipc::helpers::{empty_state, optional_str, required_str, simulated};
use crate::ipc::types::{AppState, Request};
use crate::model::{long_date, parse_iso_date, AttendanceRecord};
use chrono::{Local, NaiveDate};
use serde_json::json;

fn record_view(r: &AttendanceRecord) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = r
        .records
        .iter()
        .map(|e| {
            json!({
                "studentId": e.student_id,
                "studentName": e.student_name,
                "status": e.status.as_str(),
            })
        })
        .collect();
    json!({
        "id": r.id,
        "date": r.date,
        "dateDisplay": r.day().map(long_date),
        "courseId": r.course_id,
        "courseName": r.course_name,
        "records": rows,
    })
}

fn parse_day(req: &Request, key: &str) -> Result<Option<NaiveDate>, serde_json::Value> {
    let Some(raw) = optional_str(req, key)? else {
        return Ok(None);
    };
    parse_iso_date(&raw).map(Some).ok_or_else(|| {
        err(
            &req.id,
            "bad_params",
            format!("{} must be YYYY-MM-DD", key),
            Some(json!({ "value": raw })),
        )
    })
}

/// Attendance page: records held on one calendar day, optionally for a
/// single course, with per-status totals for the summary cards.
fn handle_attendance_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let day = match parse_day(req, "date") {
        Ok(v) => v.unwrap_or_else(|| Local::now().date_naive()),
        Err(resp) => return resp,
    };
    let course_param = match optional_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = filter::course_selector(course_param.as_deref());

    let store = &state.store;
    let records = filter::filter_attendance(store.attendance_records(), day, course_id);
    let counts = calc::status_counts(records.iter().copied());
    let empty = if records.is_empty() {
        empty_state(
            "No attendance records found",
            format!("No attendance records found for {}", long_date(day)),
        )
    } else {
        serde_json::Value::Null
    };

    ok(
        &req.id,
        json!({
            "date": day.format("%Y-%m-%d").to_string(),
            "dateDisplay": long_date(day),
            "courseId": course_id,
            "courseOptions": store.courses().iter().map(|c| json!({
                "id": c.id,
                "label": format!("{} ({})", c.name, c.code),
            })).collect::<Vec<_>>(),
            "counts": counts,
            "records": records.into_iter().map(record_view).collect::<Vec<_>>(),
            "emptyState": empty,
        }),
    )
}

fn handle_attendance_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course_id = match required_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let day = match parse_day(req, "date") {
        Ok(Some(d)) => d,
        Ok(None) => return err(&req.id, "bad_params", "missing date", None),
        Err(resp) => return resp,
    };
    let Some(course) = state.store.course_by_id(&course_id) else {
        return course_not_found(req, &course_id);
    };
    simulated(
        req,
        "Attendance recorded",
        format!("Attendance for {} on {} has been saved.", course.name, long_date(day)),
        true,
        req.params.clone(),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.open" => Some(handle_attendance_open(state, req)),
        "attendance.create" => Some(handle_attendance_create(state, req)),
        _ => None,
    }
}
