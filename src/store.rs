use crate::model::{AttendanceRecord, Course, Dataset, Student};
use crate::seed::SeedSource;
use tracing::warn;

/// Read-only data context built once at startup and handed to every
/// handler. Nothing writes to it after construction.
#[derive(Debug, Clone)]
pub struct Store {
    students: Vec<Student>,
    courses: Vec<Course>,
    attendance: Vec<AttendanceRecord>,
    source: SeedSource,
}

impl Store {
    pub fn new(ds: Dataset, source: SeedSource) -> Self {
        let store = Self {
            students: ds.students,
            courses: ds.courses,
            attendance: ds.attendance_records,
            source,
        };
        for st in &store.students {
            for course_id in &st.courses {
                if store.course_by_id(course_id).is_none() {
                    warn!(student = %st.id, course = %course_id, "dangling course reference");
                }
            }
        }
        store
    }

    pub fn source(&self) -> &SeedSource {
        &self.source
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn attendance_records(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn student_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn course_by_id(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Courses a student is enrolled in, in enrollment order. Ids with no
    /// matching course are skipped.
    pub fn student_courses(&self, student: &Student) -> Vec<&Course> {
        student
            .courses
            .iter()
            .filter_map(|id| self.course_by_id(id))
            .collect()
    }

    pub fn total_students(&self) -> usize {
        self.students.len()
    }

    pub fn total_courses(&self) -> usize {
        self.courses.len()
    }
}
