//! Colleges, students, courses, and the rows derived from their relations.

use serde::{Deserialize, Serialize};

use crate::schedule::TimeSlot;

pub type CollegeId = i64;
pub type StudentId = i64;
pub type CourseId = i64;

/// Tenant boundary: every student and course belongs to exactly one college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
  pub id:   CollegeId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub id:         StudentId,
  pub college_id: CollegeId,
  pub name:       String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub id:         CourseId,
  pub college_id: CollegeId,
  pub code:       String,
}

/// A slot tagged with the course that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSlot {
  pub course_id: CourseId,
  #[serde(flatten)]
  pub slot:      TimeSlot,
}

impl AsRef<TimeSlot> for CourseSlot {
  fn as_ref(&self) -> &TimeSlot { &self.slot }
}

/// A slot a student is bound to through one of their enrollments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
  pub student_id: StudentId,
  pub course_id:  CourseId,
  #[serde(flatten)]
  pub slot:       TimeSlot,
}

impl AsRef<TimeSlot> for Commitment {
  fn as_ref(&self) -> &TimeSlot { &self.slot }
}

/// One course on a student's schedule, with its full timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledCourse {
  pub course_id: CourseId,
  pub code:      String,
  pub timetable: Vec<TimeSlot>,
}

// ─── Operation results ───────────────────────────────────────────────────────

/// Result of replacing a course's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableUpdate {
  pub course_id: CourseId,
  /// Number of slots the course held before the update.
  pub removed:   usize,
  pub inserted:  usize,
}

/// Result of enrolling a student in a batch of courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentOutcome {
  pub student_id:       StudentId,
  /// Courses for which a new enrollment row was written.
  pub enrolled:         Vec<CourseId>,
  /// Courses the student was already taking; left untouched.
  pub already_enrolled: Vec<CourseId>,
}
