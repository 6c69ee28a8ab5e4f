use crate::model::{parse_iso_date, Dataset, Score};
use anyhow::{anyhow, Context};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// Where the dataset came from; reported by `health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Builtin,
    File(String),
}

impl SeedSource {
    pub fn describe(&self) -> String {
        match self {
            SeedSource::Builtin => "builtin".to_string(),
            SeedSource::File(p) => p.clone(),
        }
    }
}

pub fn builtin_dataset() -> anyhow::Result<Dataset> {
    parse_dataset(BUILTIN_SEED).context("failed to parse builtin seed")
}

pub fn load_dataset_file(path: &Path) -> anyhow::Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.to_string_lossy()))?;
    parse_dataset(&text)
        .with_context(|| format!("failed to parse seed file {}", path.to_string_lossy()))
}

pub fn parse_dataset(text: &str) -> anyhow::Result<Dataset> {
    let ds: Dataset = serde_json::from_str(text)?;
    validate_dataset(&ds)?;
    Ok(ds)
}

fn check_score(owner: &str, s: &Score) -> anyhow::Result<()> {
    let finite = s.score.is_finite() && s.max_score.is_finite();
    if !finite || s.score < 0.0 || s.score > s.max_score {
        return Err(anyhow!(
            "student {}: score {} ({}) must satisfy 0 <= {} <= {}",
            owner,
            s.id,
            s.name,
            s.score,
            s.max_score
        ));
    }
    Ok(())
}

/// Rejects a dataset whose structural invariants do not hold.
/// Dangling course references are tolerated; reads filter them out.
pub fn validate_dataset(ds: &Dataset) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for st in &ds.students {
        if !seen.insert(st.id.as_str()) {
            return Err(anyhow!("duplicate student id {}", st.id));
        }
        if !st.attendance.is_consistent() {
            let a = st.attendance;
            return Err(anyhow!(
                "student {}: attendance total {} != present {} + absent {} + late {}",
                st.id,
                a.total,
                a.present,
                a.absent,
                a.late
            ));
        }
        for (label, raw) in [
            ("dateOfBirth", &st.date_of_birth),
            ("enrollmentDate", &st.enrollment_date),
        ] {
            if parse_iso_date(raw).is_none() {
                return Err(anyhow!("student {}: bad {} {:?}", st.id, label, raw));
            }
        }
        for (course_id, rec) in &st.grades {
            for s in rec.assignments.iter().chain(rec.tests.iter()) {
                check_score(&st.id, s)?;
            }
            if let Some(f) = rec.final_grade {
                if !(0.0..=100.0).contains(&f) {
                    return Err(anyhow!(
                        "student {}: final grade {} in {} outside 0-100",
                        st.id,
                        f,
                        course_id
                    ));
                }
            }
        }
    }

    let mut seen = HashSet::new();
    for c in &ds.courses {
        if !seen.insert(c.id.as_str()) {
            return Err(anyhow!("duplicate course id {}", c.id));
        }
        if c.enrolled_students > c.max_capacity {
            return Err(anyhow!(
                "course {}: enrolled {} exceeds capacity {}",
                c.id,
                c.enrolled_students,
                c.max_capacity
            ));
        }
    }

    let mut seen = HashSet::new();
    for r in &ds.attendance_records {
        if !seen.insert(r.id.as_str()) {
            return Err(anyhow!("duplicate attendance record id {}", r.id));
        }
        if r.day().is_none() {
            return Err(anyhow!("attendance {}: bad date {:?}", r.id, r.date));
        }
    }
    Ok(())
}
