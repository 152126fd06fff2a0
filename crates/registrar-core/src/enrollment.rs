//! Enrollment: add a student to a batch of courses of their own college,
//! unless a requested course's timetable clashes with one they already hold
//! or with another requested course.

use std::collections::HashSet;

use crate::{
  Error,
  conflict::{find_conflict, find_cross_course_conflict},
  error::Clash,
  gateway::Gateway,
  model::{CourseId, EnrollmentOutcome, StudentId},
};

/// Enroll `student_id` in every course of `course_ids`.
///
/// Duplicate ids in the request are collapsed. Courses the student already
/// takes are reported in [`EnrollmentOutcome::already_enrolled`] and never
/// compared against themselves.
pub fn enroll<G: Gateway>(
  gw: &mut G,
  student_id: StudentId,
  course_ids: &[CourseId],
) -> Result<EnrollmentOutcome, G::Error> {
  if student_id <= 0 {
    return Err(Error::Validation(format!("invalid student id {student_id}")).into());
  }
  if course_ids.is_empty() {
    return Err(Error::Validation("empty course list".into()).into());
  }
  let requested = dedup(course_ids);

  let student = gw.student(student_id)?.ok_or(Error::StudentNotFound(student_id))?;

  let courses = gw.courses(&requested)?;
  if courses.len() != requested.len() {
    let found: HashSet<CourseId> = courses.iter().map(|c| c.id).collect();
    let missing = requested.iter().copied().filter(|id| !found.contains(id)).collect();
    return Err(Error::CoursesNotFound(missing).into());
  }

  if let Some(foreign) = courses.iter().find(|c| c.college_id != student.college_id) {
    return Err(Error::ForeignCourse { course_id: foreign.id }.into());
  }

  let new_slots = gw.course_slots(&requested)?;
  let existing = gw.student_commitments(student_id, &requested)?;

  if let Some((slot, taken)) = find_conflict(&new_slots, &existing) {
    return Err(
      Error::from(Clash {
        student_id,
        course_id: slot.course_id,
        other_course_id: taken.course_id,
        slot: slot.slot,
      })
      .into(),
    );
  }
  if let Some((first, second)) = find_cross_course_conflict(&new_slots) {
    return Err(
      Error::from(Clash {
        student_id,
        course_id: second.course_id,
        other_course_id: first.course_id,
        slot: second.slot,
      })
      .into(),
    );
  }

  let mut outcome = EnrollmentOutcome {
    student_id,
    enrolled: Vec::new(),
    already_enrolled: Vec::new(),
  };
  for course_id in requested {
    if gw.insert_enrollment(student_id, course_id)? {
      outcome.enrolled.push(course_id);
    } else {
      outcome.already_enrolled.push(course_id);
    }
  }

  Ok(outcome)
}

/// Drop repeated ids, keeping first-occurrence order.
fn dedup(ids: &[CourseId]) -> Vec<CourseId> {
  let mut seen = HashSet::with_capacity(ids.len());
  ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
