//! Error types for `registrar-core`.

use thiserror::Error;

use crate::{
  model::{CourseId, StudentId},
  schedule::TimeSlot,
};

/// Coarse classification of a rejection, used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  NotFound,
  Conflict,
}

/// Two slots that cannot both be held by `student_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clash {
  pub student_id:      StudentId,
  /// The course whose proposed slot was rejected.
  pub course_id:       CourseId,
  /// The course already occupying the time.
  pub other_course_id: CourseId,
  pub slot:            TimeSlot,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid request: {0}")]
  Validation(String),

  #[error("unknown day of week: {0:?}")]
  InvalidWeekday(String),

  #[error("invalid time of day: {0:?}")]
  InvalidTime(String),

  #[error("slot on {} must start before it ends ({} - {})", .0.day_of_week, .0.start_time, .0.end_time)]
  InvertedSlot(TimeSlot),

  #[error("course {course_id} does not belong to the student's college")]
  ForeignCourse { course_id: CourseId },

  #[error("student with ID {0} does not exist")]
  StudentNotFound(StudentId),

  #[error("course with ID {0} does not exist")]
  CourseNotFound(CourseId),

  #[error("some course IDs do not exist: {0:?}")]
  CoursesNotFound(Vec<CourseId>),

  #[error(
    "student {} has a conflict on {} ({} - {}) between course {} and course {}",
    .0.student_id, .0.slot.day_of_week, .0.slot.start_time, .0.slot.end_time,
    .0.course_id, .0.other_course_id
  )]
  Clash(Box<Clash>),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_)
      | Self::InvalidWeekday(_)
      | Self::InvalidTime(_)
      | Self::InvertedSlot(_)
      | Self::ForeignCourse { .. } => ErrorKind::Validation,
      Self::StudentNotFound(_)
      | Self::CourseNotFound(_)
      | Self::CoursesNotFound(_) => ErrorKind::NotFound,
      Self::Clash(_) => ErrorKind::Conflict,
    }
  }
}

impl From<Clash> for Error {
  fn from(clash: Clash) -> Self { Self::Clash(Box::new(clash)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
