//! The `RegistrarStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `registrar-store-sqlite`). Higher layers (`registrar-api`,
//! `registrar-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  Error,
  model::{
    College, CollegeId, Course, CourseId, EnrolledCourse, EnrollmentOutcome, Student,
    StudentId, TimetableUpdate,
  },
  schedule::TimeSlot,
};

/// Errors raised by a store backend.
///
/// A backend error either wraps a domain rejection (bad input, missing
/// record, clash) or is a storage failure of its own.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain rejection carried by this error, or `None` for a storage
  /// failure.
  fn rejection(&self) -> Option<&Error>;
}

/// Abstraction over a Registrar store backend.
///
/// The two mutating operations run their read-check-write sequence as one
/// atomic, isolated unit: either every slot or enrollment is written or none
/// is.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RegistrarStore: Send + Sync {
  type Error: StoreError;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All colleges, ordered by id.
  fn list_colleges(
    &self,
  ) -> impl Future<Output = Result<Vec<College>, Self::Error>> + Send + '_;

  /// All students, ordered by id, optionally restricted to one college.
  fn list_students(
    &self,
    college_id: Option<CollegeId>,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// All courses, ordered by id, optionally restricted to one college.
  fn list_courses(
    &self,
    college_id: Option<CollegeId>,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  /// The courses a student takes, each with its timetable. Returns `None` if
  /// the student does not exist.
  fn student_schedule(
    &self,
    student_id: StudentId,
  ) -> impl Future<Output = Result<Option<Vec<EnrolledCourse>>, Self::Error>> + Send + '_;

  /// A course's timetable ordered by day then start time. Returns `None` if
  /// the course does not exist.
  fn course_timetable(
    &self,
    course_id: CourseId,
  ) -> impl Future<Output = Result<Option<Vec<TimeSlot>>, Self::Error>> + Send + '_;

  // ── Checked writes ────────────────────────────────────────────────────

  /// Replace every slot of `course_id`. See
  /// [`assign_timetable`](crate::timetable::assign_timetable).
  fn assign_timetable(
    &self,
    course_id: CourseId,
    slots: Vec<TimeSlot>,
  ) -> impl Future<Output = Result<TimetableUpdate, Self::Error>> + Send + '_;

  /// Enroll a student in a batch of courses. See
  /// [`enroll`](crate::enrollment::enroll).
  fn enroll(
    &self,
    student_id: StudentId,
    course_ids: Vec<CourseId>,
  ) -> impl Future<Output = Result<EnrollmentOutcome, Self::Error>> + Send + '_;
}
