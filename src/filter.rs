//! Search and selection over the in-memory collections. Every call is a
//! full linear pass; nothing is indexed or cached.

use crate::model::{AttendanceRecord, Course, Student};
use chrono::NaiveDate;

/// Course selector value the dashboard uses for "no course filter".
pub const ALL_COURSES: &str = "all-courses";

/// Lowercased only. Surrounding whitespace is part of the query.
fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Matches "first last", email, or id, case-insensitively.
pub fn student_matches(student: &Student, query: &str) -> bool {
    let q = normalize_query(query);
    if q.is_empty() {
        return true;
    }
    contains_ci(&student.full_name(), &q)
        || contains_ci(&student.email, &q)
        || contains_ci(&student.id, &q)
}

pub fn search_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| student_matches(s, query))
        .collect()
}

/// Matches name, code, or instructor, case-insensitively.
pub fn course_matches(course: &Course, query: &str) -> bool {
    let q = normalize_query(query);
    if q.is_empty() {
        return true;
    }
    contains_ci(&course.name, &q)
        || contains_ci(&course.code, &q)
        || contains_ci(&course.instructor, &q)
}

pub fn search_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|c| course_matches(c, query))
        .collect()
}

/// `None`, "" and [`ALL_COURSES`] all select every course.
pub fn course_selector(raw: Option<&str>) -> Option<&str> {
    match raw.map(str::trim) {
        None | Some("") | Some(ALL_COURSES) => None,
        Some(id) => Some(id),
    }
}

/// Records held on `day` (calendar equality, time of day ignored),
/// optionally restricted to one course.
pub fn filter_attendance<'a>(
    records: &'a [AttendanceRecord],
    day: NaiveDate,
    course_id: Option<&str>,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.day() == Some(day))
        .filter(|r| course_id.map(|id| r.course_id == id).unwrap_or(true))
        .collect()
}

pub fn students_in_course<'a>(students: &'a [Student], course_id: Option<&str>) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| match course_id {
            Some(id) => s.courses.iter().any(|c| c == id),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::builtin_dataset;

    fn student_ids(items: &[&Student]) -> Vec<String> {
        items.iter().map(|s| s.id.clone()).collect()
    }

    fn course_ids(items: &[&Course]) -> Vec<String> {
        items.iter().map(|c| c.id.clone()).collect()
    }

    fn record_ids(items: &[&AttendanceRecord]) -> Vec<String> {
        items.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn jane_matches_only_jane_smith() {
        let ds = builtin_dataset().expect("seed");
        let hits = search_students(&ds.students, "jane");
        assert_eq!(student_ids(&hits), vec!["STU002"]);
        let hits = search_students(&ds.students, "JANE");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn student_search_covers_full_name_email_and_id() {
        let ds = builtin_dataset().expect("seed");
        assert_eq!(search_students(&ds.students, "n doe").len(), 1);
        assert_eq!(
            student_ids(&search_students(&ds.students, "michael.j@")),
            vec!["STU003"]
        );
        assert_eq!(
            student_ids(&search_students(&ds.students, "stu005")),
            vec!["STU005"]
        );
        assert_eq!(search_students(&ds.students, "stu").len(), 5);
    }

    #[test]
    fn student_search_is_a_superset_of_field_substrings() {
        let ds = builtin_dataset().expect("seed");
        for s in &ds.students {
            for q in [&s.last_name[1..], &s.email[..3], &s.id[2..]] {
                let hits = search_students(&ds.students, q);
                assert!(hits.iter().any(|h| h.id == s.id), "{} not found by {:?}", s.id, q);
            }
        }
    }

    #[test]
    fn unmatched_query_is_empty() {
        let ds = builtin_dataset().expect("seed");
        assert!(search_students(&ds.students, "zzz-no-such").is_empty());
        assert!(search_courses(&ds.courses, "zzz-no-such").is_empty());
    }

    #[test]
    fn empty_query_returns_everything() {
        let ds = builtin_dataset().expect("seed");
        assert_eq!(search_students(&ds.students, "").len(), 5);
        assert_eq!(search_courses(&ds.courses, "").len(), 5);
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        let ds = builtin_dataset().expect("seed");
        assert!(search_students(&ds.students, " jane").is_empty());
        assert!(search_students(&ds.students, "  ").is_empty());
        // Inner spaces still match across first and last name.
        assert_eq!(
            student_ids(&search_students(&ds.students, "jane smith")),
            vec!["STU002"]
        );
        assert!(search_courses(&ds.courses, "knuth ").is_empty());
    }

    #[test]
    fn course_search_covers_name_code_and_instructor() {
        let ds = builtin_dataset().expect("seed");
        assert_eq!(
            course_ids(&search_courses(&ds.courses, "cs3")),
            vec!["CRS004"]
        );
        assert_eq!(
            course_ids(&search_courses(&ds.courses, "knuth")),
            vec!["CRS003"]
        );
        assert_eq!(
            course_ids(&search_courses(&ds.courses, "web dev")),
            vec!["CRS002"]
        );
    }

    #[test]
    fn attendance_filters_by_day_and_course() {
        let ds = builtin_dataset().expect("seed");
        let day = NaiveDate::from_ymd_opt(2023, 3, 6).expect("date");
        let hits = filter_attendance(&ds.attendance_records, day, None);
        assert_eq!(record_ids(&hits), vec!["ATT004"]);
        assert!(filter_attendance(&ds.attendance_records, day, Some("CRS002")).is_empty());
        assert_eq!(
            filter_attendance(&ds.attendance_records, day, Some("CRS001")).len(),
            1
        );
        let none = NaiveDate::from_ymd_opt(2023, 3, 4).expect("date");
        assert!(filter_attendance(&ds.attendance_records, none, None).is_empty());
    }

    #[test]
    fn course_selector_treats_all_courses_as_none() {
        assert_eq!(course_selector(None), None);
        assert_eq!(course_selector(Some("")), None);
        assert_eq!(course_selector(Some("all-courses")), None);
        assert_eq!(course_selector(Some("CRS001")), Some("CRS001"));
    }

    #[test]
    fn students_in_course_uses_enrollment_list() {
        let ds = builtin_dataset().expect("seed");
        let hits = students_in_course(&ds.students, Some("CRS005"));
        assert_eq!(
            student_ids(&hits),
            vec!["STU003", "STU004", "STU005"]
        );
        assert_eq!(students_in_course(&ds.students, None).len(), 5);
        assert!(students_in_course(&ds.students, Some("CRS999")).is_empty());
    }
}
