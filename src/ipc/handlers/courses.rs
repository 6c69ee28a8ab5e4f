use crate::calc;
use crate::filter;
use crate::ipc::error::ok;
use crate::ipc::handlers::students::student_row;
use crate::ipc::helpers::{empty_state, required_str, search_query, simulated};
use crate::ipc::types::{AppState, Request};
use crate::model::Course;
use crate::store::Store;
use serde_json::json;

pub(crate) fn schedule_display(c: &Course) -> String {
    format!(
        "{} \u{2022} {} - {}",
        c.schedule.days.join(", "),
        c.schedule.start_time,
        c.schedule.end_time
    )
}

pub(crate) fn course_row(c: &Course) -> serde_json::Value {
    json!({
        "id": c.id,
        "name": c.name,
        "code": c.code,
        "instructor": c.instructor,
        "room": c.room,
        "schedule": c.schedule,
        "scheduleDisplay": schedule_display(c),
        "enrolledStudents": c.enrolled_students,
        "maxCapacity": c.max_capacity,
        "enrollmentPercentage": calc::enrollment_percentage(c),
    })
}

fn course_detail(store: &Store, c: &Course) -> serde_json::Value {
    // Roster from the seed; enrolledStudents is a separate headline figure.
    let roster: Vec<serde_json::Value> = filter::students_in_course(store.students(), Some(c.id.as_str()))
        .into_iter()
        .map(|s| student_row(store, s))
        .collect();
    let mut out = course_row(c);
    out["description"] = json!(c.description);
    out["roster"] = json!(roster);
    out
}

fn handle_courses_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let query = match search_query(req, "query") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let store = &state.store;
    let rows: Vec<serde_json::Value> = filter::search_courses(store.courses(), &query)
        .into_iter()
        .map(course_row)
        .collect();
    let empty = if store.courses().is_empty() {
        empty_state("No courses found", "There are no courses in the system yet.")
    } else if rows.is_empty() {
        empty_state("No courses found", format!("No courses match \"{}\".", query))
    } else {
        serde_json::Value::Null
    };
    ok(
        &req.id,
        json!({
            "query": query,
            "total": store.total_courses(),
            "courses": rows,
            "emptyState": empty,
        }),
    )
}

fn handle_courses_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course_id = match required_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let store = &state.store;
    match store.course_by_id(&course_id) {
        Some(c) => ok(
            &req.id,
            json!({ "course": course_detail(store, c), "emptyState": null }),
        ),
        None => ok(
            &req.id,
            json!({
                "course": null,
                "emptyState": empty_state(
                    "Course not found",
                    format!("No course with id {}.", course_id),
                ),
            }),
        ),
    }
}

fn handle_courses_create(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut fields = Vec::new();
    for key in ["name", "code", "instructor"] {
        match required_str(req, key) {
            Ok(v) => fields.push(v),
            Err(resp) => return resp,
        }
    }
    simulated(
        req,
        "Course added",
        format!("{} ({}) has been added.", fields[0], fields[1]),
        true,
        req.params.clone(),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(handle_courses_list(state, req)),
        "courses.get" => Some(handle_courses_get(state, req)),
        "courses.create" => Some(handle_courses_create(state, req)),
        _ => None,
    }
}
