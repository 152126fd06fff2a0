//! JSON seed files.
//!
//! Reference data (colleges, students, courses) is inserted directly.
//! Timetables and enrollments go through the checked operations, so a seed
//! that double-books a student is rejected like any other request.
//!
//! ```json
//! {
//!   "colleges":    [{ "id": 1, "name": "North" }],
//!   "students":    [{ "id": 1, "college_id": 1, "name": "Ada" }],
//!   "courses":     [{ "id": 10, "college_id": 1, "code": "CS101",
//!                     "timetable": [{ "day_of_week": "Monday", "start_time": "09:00", "end_time": "10:00" }] }],
//!   "enrollments": [{ "student_id": 1, "course_ids": [10] }]
//! }
//! ```

use std::path::Path;

use anyhow::Context as _;
use registrar_core::{
  model::{College, Course, CourseId, Student, StudentId},
  schedule::TimeSlot,
  store::RegistrarStore as _,
};
use registrar_store_sqlite::SqliteStore;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
  pub colleges:    Vec<College>,
  pub students:    Vec<Student>,
  pub courses:     Vec<SeedCourse>,
  pub enrollments: Vec<SeedEnrollment>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCourse {
  #[serde(flatten)]
  pub course:    Course,
  #[serde(default)]
  pub timetable: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize)]
pub struct SeedEnrollment {
  pub student_id: StudentId,
  pub course_ids: Vec<CourseId>,
}

impl Seed {
  pub fn from_path(path: &Path) -> anyhow::Result<Self> {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read seed file {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse seed file {path:?}"))
  }

  /// Insert everything in dependency order: colleges, students, courses,
  /// timetables, then enrollments.
  pub async fn apply(self, store: &SqliteStore) -> anyhow::Result<()> {
    for college in self.colleges {
      let id = college.id;
      store
        .add_college(college)
        .await
        .with_context(|| format!("failed to seed college {id}"))?;
    }
    for student in self.students {
      let id = student.id;
      store
        .add_student(student)
        .await
        .with_context(|| format!("failed to seed student {id}"))?;
    }

    let mut timetables = Vec::new();
    for SeedCourse { course, timetable } in self.courses {
      let id = course.id;
      store
        .add_course(course)
        .await
        .with_context(|| format!("failed to seed course {id}"))?;
      if !timetable.is_empty() {
        timetables.push((id, timetable));
      }
    }
    for (id, slots) in timetables {
      store
        .assign_timetable(id, slots)
        .await
        .with_context(|| format!("failed to seed timetable of course {id}"))?;
    }

    for SeedEnrollment { student_id, course_ids } in self.enrollments {
      store
        .enroll(student_id, course_ids)
        .await
        .with_context(|| format!("failed to seed enrollments of student {student_id}"))?;
    }

    tracing::info!("seed applied");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use registrar_core::store::RegistrarStore as _;

  use super::*;

  const SEED: &str = r#"{
    "colleges": [{ "id": 1, "name": "North" }],
    "students": [{ "id": 1, "college_id": 1, "name": "Ada" }],
    "courses": [
      { "id": 10, "college_id": 1, "code": "CS101",
        "timetable": [{ "day_of_week": "Wednesday", "start_time": "10:00", "end_time": "11:00" }] },
      { "id": 11, "college_id": 1, "code": "MA101",
        "timetable": [{ "day_of_week": "Wednesday", "start_time": "10:30", "end_time": "11:30" }] }
    ],
    "enrollments": [{ "student_id": 1, "course_ids": [10] }]
  }"#;

  #[tokio::test]
  async fn seed_populates_store() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let seed: Seed = serde_json::from_str(SEED).unwrap();
    seed.apply(&store).await.unwrap();

    let schedule = store.student_schedule(1).await.unwrap().unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].code, "CS101");
    assert_eq!(schedule[0].timetable.len(), 1);
  }

  #[tokio::test]
  async fn seed_with_clashing_enrollment_fails() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut seed: Seed = serde_json::from_str(SEED).unwrap();
    seed.enrollments[0].course_ids = vec![10, 11];

    let err = seed.apply(&store).await.unwrap_err();
    assert!(format!("{err:#}").contains("conflict"), "{err:#}");
    assert!(store.student_schedule(1).await.unwrap().unwrap().is_empty());
  }

  #[test]
  fn empty_seed_parses() {
    let seed: Seed = serde_json::from_str("{}").unwrap();
    assert!(seed.colleges.is_empty() && seed.enrollments.is_empty());
  }
}
