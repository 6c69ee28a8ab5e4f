use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ISO calendar date format used by every date field in the dataset.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`, or the day part of an ISO timestamp
/// (`YYYY-MM-DDTHH:MM...`). Time of day is dropped.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(t, ISO_DATE) {
        return Some(d);
    }
    let (day, _time) = t.split_once('T')?;
    NaiveDate::parse_from_str(day, ISO_DATE).ok()
}

/// "March 1, 2023"
pub fn long_date(d: NaiveDate) -> String {
    d.format("%B %-d, %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Attendance tally for one student. `total` is stored, not derived, and
/// must equal `present + absent + late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceTally {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub total: u32,
}

impl AttendanceTally {
    /// A sum that overflows `u32` never matches `total`.
    pub fn is_consistent(&self) -> bool {
        self.present
            .checked_add(self.absent)
            .and_then(|v| v.checked_add(self.late))
            == Some(self.total)
    }
}

/// A single assignment or test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    #[serde(default)]
    pub assignments: Vec<Score>,
    #[serde(default)]
    pub tests: Vec<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: Gender,
    /// Letter grade such as "A+" or "B".
    pub grade: String,
    pub address: String,
    pub enrollment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    pub attendance: AttendanceTally,
    /// Keyed by course id. Ordered so views come out deterministic.
    #[serde(default)]
    pub grades: BTreeMap<String, GradeRecord>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub instructor: String,
    pub schedule: Schedule,
    pub room: String,
    pub enrolled_students: u32,
    pub max_capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: String,
    pub student_name: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub date: String,
    pub course_id: String,
    pub course_name: String,
    #[serde(default)]
    pub records: Vec<AttendanceEntry>,
}

impl AttendanceRecord {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Whole dataset as it appears in a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub attendance_records: Vec<AttendanceRecord>,
}
