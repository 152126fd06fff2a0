//! Timetable assignment: replace every slot of a course, unless the new
//! timetable would double-book a student already taking it.

use crate::{
  Error,
  conflict::find_conflict,
  error::Clash,
  gateway::Gateway,
  model::{CourseId, TimetableUpdate},
  schedule::TimeSlot,
};

/// Replace the timetable of `course_id` with `slots`.
///
/// Fails with a validation error for an empty or inverted slot list, with
/// `CourseNotFound` for an unknown course, and with a clash naming the first
/// student found double-booked. All checks run before the first write.
pub fn assign_timetable<G: Gateway>(
  gw: &mut G,
  course_id: CourseId,
  slots: &[TimeSlot],
) -> Result<TimetableUpdate, G::Error> {
  if slots.is_empty() {
    return Err(Error::Validation("timetable update requires at least one slot".into()).into());
  }
  for slot in slots {
    slot.validate()?;
  }

  gw.course(course_id)?.ok_or(Error::CourseNotFound(course_id))?;

  let students = gw.enrolled_students(course_id)?;
  if !students.is_empty() {
    let held = gw.commitments_outside(&students, course_id)?;
    if let Some((slot, taken)) = find_conflict(slots, &held) {
      return Err(
        Error::from(Clash {
          student_id:      taken.student_id,
          course_id,
          other_course_id: taken.course_id,
          slot:            *slot,
        })
        .into(),
      );
    }
  }

  let removed = gw.clear_timetable(course_id)?;
  for slot in slots {
    gw.insert_slot(course_id, slot)?;
  }

  Ok(TimetableUpdate { course_id, removed, inserted: slots.len() })
}
