use crate::calc;
use crate::filter;
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::students::{course_not_found, score_row, student_not_found};
use crate::ipc::helpers::{empty_state, optional_str, required_str, simulated};
use crate::ipc::types::{AppState, Request};
use crate::model::{GradeRecord, Score, Student};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradeTab {
    Assignments,
    Tests,
    Final,
}

impl GradeTab {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("assignments") => Some(GradeTab::Assignments),
            Some("tests") => Some(GradeTab::Tests),
            Some("final") => Some(GradeTab::Final),
            Some(_) => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            GradeTab::Assignments => "assignments",
            GradeTab::Tests => "tests",
            GradeTab::Final => "final",
        }
    }

    fn scores(self, rec: &GradeRecord) -> &[Score] {
        match self {
            GradeTab::Assignments => &rec.assignments,
            GradeTab::Tests => &rec.tests,
            GradeTab::Final => &[],
        }
    }
}

/// Score table for one course: one column per distinct item id, in the
/// order items first appear across the roster.
fn score_table(students: &[&Student], course_id: &str, tab: GradeTab) -> serde_json::Value {
    let mut columns: Vec<(&str, &str)> = Vec::new();
    for s in students {
        if let Some(rec) = s.grades.get(course_id) {
            for item in tab.scores(rec) {
                if !columns.iter().any(|(id, _)| *id == item.id) {
                    columns.push((item.id.as_str(), item.name.as_str()));
                }
            }
        }
    }

    let rows: Vec<serde_json::Value> = students
        .iter()
        .map(|s| {
            let rec = s.grades.get(course_id);
            let cells: Vec<serde_json::Value> = columns
                .iter()
                .map(|(id, _)| {
                    rec.and_then(|r| tab.scores(r).iter().find(|v| v.id == *id))
                        .map(score_row)
                        .unwrap_or(serde_json::Value::Null)
                })
                .collect();
            json!({
                "studentId": s.id,
                "name": s.full_name(),
                "hasGrades": rec.is_some(),
                "cells": cells,
            })
        })
        .collect();

    json!({
        "columns": columns
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect::<Vec<_>>(),
        "rows": rows,
    })
}

fn final_table_for_course(students: &[&Student], course_id: &str) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = students
        .iter()
        .map(|s| {
            let fin = s.grades.get(course_id).and_then(|r| r.final_grade);
            json!({
                "studentId": s.id,
                "name": s.full_name(),
                "finalGrade": fin,
                "letter": fin.map(calc::letter_for_score),
            })
        })
        .collect();
    json!({ "columns": [], "rows": rows })
}

fn final_table_all_courses(state: &AppState, students: &[&Student]) -> serde_json::Value {
    let courses = state.store.courses();
    let rows: Vec<serde_json::Value> = students
        .iter()
        .map(|s| {
            let cells: Vec<serde_json::Value> = courses
                .iter()
                .map(|c| json!(s.grades.get(&c.id).and_then(|r| r.final_grade)))
                .collect();
            let avg = calc::average_grade(s);
            json!({
                "studentId": s.id,
                "name": s.full_name(),
                "cells": cells,
                "average": avg,
                "averageLetter": calc::letter_for_score(avg as f64),
            })
        })
        .collect();
    json!({
        "columns": courses
            .iter()
            .map(|c| json!({ "id": c.id, "name": c.code }))
            .collect::<Vec<_>>(),
        "rows": rows,
    })
}

/// Grades page: students in the selected course (or everyone), rendered
/// for the active tab.
fn handle_grades_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course_param = match optional_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let tab_param = match optional_str(req, "tab") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(tab) = GradeTab::parse(tab_param.as_deref()) else {
        return err(
            &req.id,
            "bad_params",
            "tab must be assignments, tests, or final",
            None,
        );
    };
    let course_id = filter::course_selector(course_param.as_deref());

    let store = &state.store;
    let students = filter::students_in_course(store.students(), course_id);
    let course = course_id.and_then(|id| store.course_by_id(id));
    let title = match (course_id, course) {
        (_, Some(c)) => format!("Grades: {}", c.name),
        (Some(id), None) => format!("Grades: {}", id),
        (None, None) => "All Student Grades".to_string(),
    };

    if students.is_empty() {
        let description = if course_id.is_some() {
            "No students are enrolled in this course."
        } else {
            "Please select a course to view student grades."
        };
        return ok(
            &req.id,
            json!({
                "courseId": course_id,
                "title": title,
                "tab": tab.as_str(),
                "table": null,
                "message": null,
                "emptyState": empty_state("No students found", description),
            }),
        );
    }

    let (table, message) = match (tab, course_id) {
        (GradeTab::Final, Some(id)) => (final_table_for_course(&students, id), None),
        (GradeTab::Final, None) => (final_table_all_courses(state, &students), None),
        (_, Some(id)) => (score_table(&students, id, tab), None),
        (_, None) => (
            serde_json::Value::Null,
            Some(format!(
                "Please select a specific course to view {}.",
                tab.as_str()
            )),
        ),
    };

    ok(
        &req.id,
        json!({
            "courseId": course_id,
            "title": title,
            "tab": tab.as_str(),
            "table": table,
            "message": message,
            "emptyState": null,
        }),
    )
}

fn handle_grades_record(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match required_str(req, "courseId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if req.params.get("score").and_then(|v| v.as_f64()).is_none() {
        return err(&req.id, "bad_params", "missing score", None);
    }
    let store = &state.store;
    let Some(s) = store.student_by_id(&student_id) else {
        return student_not_found(req, &student_id);
    };
    let Some(c) = store.course_by_id(&course_id) else {
        return course_not_found(req, &course_id);
    };
    simulated(
        req,
        "Grade recorded",
        format!("Grade for {} in {} has been saved.", s.full_name(), c.name),
        true,
        req.params.clone(),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.open" => Some(handle_grades_open(state, req)),
        "grades.record" => Some(handle_grades_record(state, req)),
        _ => None,
    }
}
