mod test_support;

use serde_json::json;
use test_support::{ids, request_err, request_ok, spawn_sidecar};

#[test]
fn list_search_is_case_insensitive_across_name_email_and_id() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let jane = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.list",
        json!({ "query": "jane" }),
    );
    assert_eq!(ids(&jane["students"], "id"), vec!["STU002"]);
    assert!(jane["emptyState"].is_null());

    let upper = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.list",
        json!({ "query": "WILLIAMS" }),
    );
    assert_eq!(ids(&upper["students"], "id"), vec!["STU004"]);

    let by_email = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.list",
        json!({ "query": "david.b@example" }),
    );
    assert_eq!(ids(&by_email["students"], "id"), vec!["STU005"]);

    let by_id = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.list",
        json!({ "query": "stu00" }),
    );
    assert_eq!(by_id["students"].as_array().map(|a| a.len()), Some(5));

    let none = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.list",
        json!({ "query": "nobody-here" }),
    );
    assert_eq!(none["students"].as_array().map(|a| a.len()), Some(0));
    assert_eq!(
        none.pointer("/emptyState/title").and_then(|v| v.as_str()),
        Some("No students found")
    );
    assert_eq!(none["total"].as_u64(), Some(5));
}

#[test]
fn list_rows_carry_derived_metrics() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let list = request_ok(&mut stdin, &mut reader, "1", "students.list", json!({}));
    let john = &list["students"][0];
    assert_eq!(john["id"].as_str(), Some("STU001"));
    assert_eq!(john["fullName"].as_str(), Some("John Doe"));
    assert_eq!(john["initials"].as_str(), Some("JD"));
    assert_eq!(john["attendancePercentage"].as_u64(), Some(84));
    assert_eq!(john["averageGrade"].as_u64(), Some(87));
    assert_eq!(john["courseCount"].as_u64(), Some(3));
}

#[test]
fn open_shows_detail_for_known_id_and_list_otherwise() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let detail = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.open",
        json!({ "studentId": "STU004" }),
    );
    assert_eq!(detail["view"].as_str(), Some("detail"));
    let s = &detail["student"];
    assert_eq!(s["fullName"].as_str(), Some("Emily Williams"));
    // 89.5 rounds half up
    assert_eq!(s["averageGrade"].as_u64(), Some(90));
    assert_eq!(s["attendance"]["percentage"].as_u64(), Some(90));
    assert_eq!(s["dateOfBirthDisplay"].as_str(), Some("August 20, 2000"));
    assert_eq!(s["enrollmentDateDisplay"].as_str(), Some("September 1, 2022"));
    assert_eq!(ids(&s["courses"], "code"), vec!["CS101", "CS330", "CS440"]);
    assert_eq!(
        s["courses"][0]["scheduleDisplay"].as_str(),
        Some("Monday, Wednesday \u{2022} 09:00 - 10:30")
    );
    assert_eq!(ids(&s["grades"], "courseId"), vec!["CRS001", "CRS004"]);
    assert_eq!(s["grades"][1]["courseName"].as_str(), Some("Database Systems"));
    assert_eq!(s["grades"][1]["finalLetter"].as_str(), Some("B"));
    assert_eq!(s["grades"][0]["tests"][0]["percent"].as_u64(), Some(92));

    let unknown = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.open",
        json!({ "studentId": "STU404" }),
    );
    assert_eq!(unknown["view"].as_str(), Some("list"));
    assert_eq!(unknown["students"].as_array().map(|a| a.len()), Some(5));

    let none = request_ok(&mut stdin, &mut reader, "3", "students.open", json!({}));
    assert_eq!(none["view"].as_str(), Some("list"));
}

#[test]
fn get_unknown_student_is_null_not_an_error() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let r = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.get",
        json!({ "studentId": "STU999" }),
    );
    assert!(r["student"].is_null());
    assert_eq!(
        r.pointer("/emptyState/title").and_then(|v| v.as_str()),
        Some("Student not found")
    );

    let known = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.get",
        json!({ "studentId": "STU002" }),
    );
    assert_eq!(known["student"]["id"].as_str(), Some("STU002"));
    assert_eq!(known["student"]["attendance"]["total"].as_u64(), Some(50));

    let code = request_err(&mut stdin, &mut reader, "3", "students.get", json!({}));
    assert_eq!(code, "bad_params");
    let code = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "students.list",
        json!({ "query": 7 }),
    );
    assert_eq!(code, "bad_params");
}

#[test]
fn courses_list_search_and_get() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let by_instructor = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "courses.list",
        json!({ "query": "LOVELACE" }),
    );
    assert_eq!(ids(&by_instructor["courses"], "id"), vec!["CRS002"]);

    let by_code = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.list",
        json!({ "query": "cs4" }),
    );
    assert_eq!(ids(&by_code["courses"], "id"), vec!["CRS005"]);
    assert_eq!(by_code["courses"][0]["enrollmentPercentage"].as_u64(), Some(90));

    let none = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.list",
        json!({ "query": "underwater basket weaving" }),
    );
    assert_eq!(none["courses"].as_array().map(|a| a.len()), Some(0));
    assert!(!none["emptyState"].is_null());

    let c = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "courses.get",
        json!({ "courseId": "CRS003" }),
    );
    assert_eq!(c["course"]["instructor"].as_str(), Some("Dr. Donald Knuth"));
    assert_eq!(
        ids(&c["course"]["roster"], "id"),
        vec!["STU001", "STU002", "STU003"]
    );

    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courses.get",
        json!({ "courseId": "CRS404" }),
    );
    assert!(missing["course"].is_null());
}
