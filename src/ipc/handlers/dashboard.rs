use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_dashboard_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = &state.store;
    let students = store.students();

    let student_grades: Vec<serde_json::Value> = students
        .iter()
        .map(|s| {
            json!({
                "studentId": s.id,
                "name": s.full_name(),
                "grade": calc::average_grade(s),
            })
        })
        .collect();

    let distribution = calc::attendance_distribution(students);

    ok(
        &req.id,
        json!({
            "cards": {
                "totalStudents": store.total_students(),
                "totalCourses": store.total_courses(),
                "averageAttendance": calc::average_attendance_all(students),
                "averageGrade": calc::average_grade_all(students),
            },
            "gradeDistribution": calc::grade_distribution(students),
            "courseEnrollment": calc::course_enrollment(store.courses()),
            "studentGrades": student_grades,
            "attendanceDistribution": [
                { "name": "Present", "value": distribution.present },
                { "name": "Absent", "value": distribution.absent },
                { "name": "Late", "value": distribution.late },
            ],
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.open" => Some(handle_dashboard_open(state, req)),
        _ => None,
    }
}
