use crate::model::{AttendanceRecord, AttendanceStatus, Course, Student};
use serde::Serialize;

/// Round-half-up to the nearest integer: `Int(x + 0.5)`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn to_percent_int(x: f64) -> u32 {
    round_half_up(x).clamp(0.0, 100.0) as u32
}

fn attendance_ratio_percent(student: &Student) -> f64 {
    let a = student.attendance;
    if a.total == 0 {
        return 0.0;
    }
    (a.present as f64) * 100.0 / (a.total as f64)
}

/// `round(present / total * 100)`, or 0 when no sessions were recorded.
pub fn attendance_percentage(student: &Student) -> u32 {
    to_percent_int(attendance_ratio_percent(student))
}

/// Rounded mean of every defined final grade; 0 when the student has none.
pub fn average_grade(student: &Student) -> u32 {
    let finals: Vec<f64> = student
        .grades
        .values()
        .filter_map(|g| g.final_grade)
        .collect();
    if finals.is_empty() {
        return 0;
    }
    to_percent_int(finals.iter().sum::<f64>() / finals.len() as f64)
}

/// Mean of the unrounded per-student attendance percentages, rounded once.
pub fn average_attendance_all(students: &[Student]) -> u32 {
    if students.is_empty() {
        return 0;
    }
    let sum: f64 = students.iter().map(attendance_ratio_percent).sum();
    to_percent_int(sum / students.len() as f64)
}

/// Mean of the per-student (already rounded) averages, rounded again.
pub fn average_grade_all(students: &[Student]) -> u32 {
    if students.is_empty() {
        return 0;
    }
    let sum: u32 = students.iter().map(average_grade).sum();
    to_percent_int(sum as f64 / students.len() as f64)
}

pub fn letter_for_score(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

pub fn initials(first: &str, last: &str) -> String {
    first
        .chars()
        .take(1)
        .chain(last.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeBucket {
    pub name: &'static str,
    pub count: usize,
}

/// Students bucketed by the first letter of their letter grade.
/// "A+", "A" and "A-" all land in "A".
pub fn grade_distribution(students: &[Student]) -> Vec<GradeBucket> {
    ["A", "B", "C", "D", "F"]
        .into_iter()
        .map(|name| GradeBucket {
            name,
            count: students.iter().filter(|s| s.grade.starts_with(name)).count(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttendanceDistribution {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
}

pub fn attendance_distribution(students: &[Student]) -> AttendanceDistribution {
    students
        .iter()
        .fold(AttendanceDistribution::default(), |mut acc, s| {
            acc.present += s.attendance.present as u64;
            acc.absent += s.attendance.absent as u64;
            acc.late += s.attendance.late as u64;
            acc
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollment {
    pub course_id: String,
    pub code: String,
    pub enrolled: u32,
    pub capacity: u32,
}

pub fn course_enrollment(courses: &[Course]) -> Vec<CourseEnrollment> {
    courses
        .iter()
        .map(|c| CourseEnrollment {
            course_id: c.id.clone(),
            code: c.code.clone(),
            enrolled: c.enrolled_students,
            capacity: c.max_capacity,
        })
        .collect()
}

/// Share of capacity in use, 0-100. A zero-capacity course reports 0.
pub fn enrollment_percentage(course: &Course) -> u32 {
    if course.max_capacity == 0 {
        return 0;
    }
    to_percent_int((course.enrolled_students as f64) * 100.0 / (course.max_capacity as f64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

pub fn status_counts<'a, I>(records: I) -> StatusCounts
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut out = StatusCounts::default();
    for e in records.into_iter().flat_map(|r| r.records.iter()) {
        match e.status {
            AttendanceStatus::Present => out.present += 1,
            AttendanceStatus::Absent => out.absent += 1,
            AttendanceStatus::Late => out.late += 1,
            AttendanceStatus::Excused => out.excused += 1,
        }
    }
    out
}
