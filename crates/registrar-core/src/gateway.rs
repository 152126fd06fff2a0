//! The `Gateway` trait: record access within one unit of work.
//!
//! The checked operations in [`timetable`](crate::timetable) and
//! [`enrollment`](crate::enrollment) are written against this trait. A backend
//! implements it over an open transaction and is responsible for committing
//! only when the operation returns `Ok`; on `Err` nothing may persist.
//!
//! Methods are synchronous: a backend runs the whole operation inside a single
//! blocking call (e.g. on the SQLite connection thread).

use crate::{
  Error,
  model::{Commitment, Course, CourseId, CourseSlot, Student, StudentId},
  schedule::TimeSlot,
};

pub trait Gateway {
  /// Backend error. Domain rejections are raised through `From<Error>`.
  type Error: From<Error>;

  // ── Lookups ───────────────────────────────────────────────────────────

  fn course(&mut self, id: CourseId) -> Result<Option<Course>, Self::Error>;

  fn student(&mut self, id: StudentId) -> Result<Option<Student>, Self::Error>;

  /// All courses whose id is in `ids`. Missing ids are simply absent.
  fn courses(&mut self, ids: &[CourseId]) -> Result<Vec<Course>, Self::Error>;

  /// Distinct ids of students enrolled in `course_id`.
  fn enrolled_students(
    &mut self,
    course_id: CourseId,
  ) -> Result<Vec<StudentId>, Self::Error>;

  /// Every slot of every course other than `course_id` taken by any of
  /// `students`, as a single batched read.
  fn commitments_outside(
    &mut self,
    students: &[StudentId],
    course_id: CourseId,
  ) -> Result<Vec<Commitment>, Self::Error>;

  /// The union of the timetables of `ids`.
  fn course_slots(&mut self, ids: &[CourseId]) -> Result<Vec<CourseSlot>, Self::Error>;

  /// Every slot `student_id` holds through an enrollment, skipping the
  /// courses in `excluding`.
  fn student_commitments(
    &mut self,
    student_id: StudentId,
    excluding: &[CourseId],
  ) -> Result<Vec<Commitment>, Self::Error>;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Delete every slot of `course_id`; returns how many were removed.
  fn clear_timetable(&mut self, course_id: CourseId) -> Result<usize, Self::Error>;

  fn insert_slot(&mut self, course_id: CourseId, slot: &TimeSlot) -> Result<(), Self::Error>;

  /// Insert-if-absent. Returns `false` when the pair already existed.
  fn insert_enrollment(
    &mut self,
    student_id: StudentId,
    course_id: CourseId,
  ) -> Result<bool, Self::Error>;
}
