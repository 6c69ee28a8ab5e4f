use crate::calc;
use crate::filter;
use crate::ipc::error::ok;
use crate::ipc::handlers::courses::course_row;
use crate::ipc::helpers::{
    empty_state, optional_str, required_str, search_query, simulated, simulated_unresolved,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{long_date, parse_iso_date, Score, Student};
use crate::store::Store;
use serde_json::json;

fn display_date(raw: &str) -> String {
    parse_iso_date(raw)
        .map(long_date)
        .unwrap_or_else(|| raw.to_string())
}

pub(crate) fn score_row(s: &Score) -> serde_json::Value {
    let percent = if s.max_score > 0.0 {
        calc::round_half_up(100.0 * s.score / s.max_score) as u32
    } else {
        0
    };
    json!({
        "id": s.id,
        "name": s.name,
        "score": s.score,
        "maxScore": s.max_score,
        "percent": percent,
    })
}

pub(crate) fn student_row(store: &Store, s: &Student) -> serde_json::Value {
    json!({
        "id": s.id,
        "firstName": s.first_name,
        "lastName": s.last_name,
        "fullName": s.full_name(),
        "initials": calc::initials(&s.first_name, &s.last_name),
        "email": s.email,
        "phone": s.phone,
        "grade": s.grade,
        "profileImage": s.profile_image,
        "courseCount": store.student_courses(s).len(),
        "attendancePercentage": calc::attendance_percentage(s),
        "averageGrade": calc::average_grade(s),
    })
}

fn student_detail(store: &Store, s: &Student) -> serde_json::Value {
    let courses: Vec<serde_json::Value> = store
        .student_courses(s)
        .into_iter()
        .map(course_row)
        .collect();

    let grades: Vec<serde_json::Value> = s
        .grades
        .iter()
        .map(|(course_id, rec)| {
            let course = store.course_by_id(course_id);
            json!({
                "courseId": course_id,
                "courseName": course.map(|c| c.name.as_str()).unwrap_or(course_id.as_str()),
                "courseCode": course.map(|c| c.code.as_str()),
                "assignments": rec.assignments.iter().map(score_row).collect::<Vec<_>>(),
                "tests": rec.tests.iter().map(score_row).collect::<Vec<_>>(),
                "finalGrade": rec.final_grade,
                "finalLetter": rec.final_grade.map(calc::letter_for_score),
            })
        })
        .collect();

    let a = s.attendance;
    let mut out = student_row(store, s);
    out["dateOfBirth"] = json!(s.date_of_birth);
    out["dateOfBirthDisplay"] = json!(display_date(&s.date_of_birth));
    out["gender"] = json!(s.gender);
    out["address"] = json!(s.address);
    out["enrollmentDate"] = json!(s.enrollment_date);
    out["enrollmentDateDisplay"] = json!(display_date(&s.enrollment_date));
    out["attendance"] = json!({
        "present": a.present,
        "absent": a.absent,
        "late": a.late,
        "total": a.total,
        "percentage": calc::attendance_percentage(s),
    });
    out["coursesEmptyState"] = if courses.is_empty() {
        empty_state("No courses", "This student is not enrolled in any courses.")
    } else {
        serde_json::Value::Null
    };
    out["gradesEmptyState"] = if grades.is_empty() {
        empty_state("No grades", "No grades have been recorded for this student.")
    } else {
        serde_json::Value::Null
    };
    out["courses"] = json!(courses);
    out["grades"] = json!(grades);
    out
}

fn list_view(store: &Store, query: &str) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = filter::search_students(store.students(), query)
        .into_iter()
        .map(|s| student_row(store, s))
        .collect();
    let empty = if store.students().is_empty() {
        empty_state("No students found", "There are no students in the system yet.")
    } else if rows.is_empty() {
        empty_state("No students found", format!("No students match \"{}\".", query))
    } else {
        serde_json::Value::Null
    };
    json!({
        "view": "list",
        "query": query,
        "total": store.total_students(),
        "students": rows,
        "emptyState": empty,
    })
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let query = match search_query(req, "query") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    ok(&req.id, list_view(&state.store, &query))
}

/// Students page: the detail view when `studentId` resolves, the full list
/// otherwise.
fn handle_students_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match optional_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let store = &state.store;
    match student_id.as_deref().and_then(|id| store.student_by_id(id)) {
        Some(s) => ok(
            &req.id,
            json!({ "view": "detail", "student": student_detail(store, s) }),
        ),
        None => ok(&req.id, list_view(store, "")),
    }
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let store = &state.store;
    match store.student_by_id(&student_id) {
        Some(s) => ok(
            &req.id,
            json!({ "student": student_detail(store, s), "emptyState": null }),
        ),
        None => ok(
            &req.id,
            json!({
                "student": null,
                "emptyState": empty_state(
                    "Student not found",
                    format!("No student with id {}.", student_id),
                ),
            }),
        ),
    }
}

fn handle_students_create(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut fields = Vec::new();
    for key in ["firstName", "lastName", "email"] {
        match required_str(req, key) {
            Ok(v) => fields.push(v),
            Err(resp) => return resp,
        }
    }
    simulated(
        req,
        "Student added",
        format!("{} {} has been added.", fields[0], fields[1]),
        true,
        req.params.clone(),
    )
}

pub(crate) fn student_not_found(req: &Request, id: &str) -> serde_json::Value {
    simulated_unresolved(
        req,
        "Student not found",
        format!("No student with id \"{}\" exists; nothing was changed.", id),
    )
}

pub(crate) fn course_not_found(req: &Request, id: &str) -> serde_json::Value {
    simulated_unresolved(
        req,
        "Course not found",
        format!("No course with id \"{}\" exists; nothing was changed.", id),
    )
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(s) = state.store.student_by_id(&student_id) else {
        return student_not_found(req, &student_id);
    };
    simulated(
        req,
        "Profile updated",
        format!("{}'s profile has been updated.", s.full_name()),
        false,
        req.params.clone(),
    )
}

fn handle_enrollment_change(state: &mut AppState, req: &Request, enroll: bool) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match required_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let store = &state.store;
    let Some(s) = store.student_by_id(&student_id) else {
        return student_not_found(req, &student_id);
    };
    let Some(c) = store.course_by_id(&course_id) else {
        return course_not_found(req, &course_id);
    };
    let enrolled = s.courses.iter().any(|id| id == &c.id);
    let (title, description) = match (enroll, enrolled) {
        (true, false) => (
            "Course added",
            format!("{} has been enrolled in {}.", s.full_name(), c.name),
        ),
        (true, true) => (
            "Already enrolled",
            format!("{} is already enrolled in {}.", s.full_name(), c.name),
        ),
        (false, true) => (
            "Course removed",
            format!("{} has been removed from {}.", s.full_name(), c.name),
        ),
        (false, false) => (
            "Not enrolled",
            format!("{} is not enrolled in {}.", s.full_name(), c.name),
        ),
    };
    let mut resp = simulated(
        req,
        title,
        description,
        false,
        json!({ "studentId": s.id, "courseId": c.id }),
    );
    resp["result"]["wasEnrolled"] = json!(enrolled);
    resp
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.open" => Some(handle_students_open(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.enrollCourse" => Some(handle_enrollment_change(state, req, true)),
        "students.unenrollCourse" => Some(handle_enrollment_change(state, req, false)),
        _ => None,
    }
}
