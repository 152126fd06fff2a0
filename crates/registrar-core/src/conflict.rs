//! Slot-overlap checking.
//!
//! Every check is a pairwise scan: O(|a| × |b|). Timetables are bounded by a
//! realistic week (tens of slots), so nothing smarter is warranted. Pairs are
//! visited in the order `a` then `b` are given, which makes the reported pair
//! deterministic for a given input order.

use crate::{model::CourseSlot, schedule::TimeSlot};

/// Two slots conflict when they share a day and their half-open ranges
/// intersect.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool { a.overlaps(b) }

/// `true` if any slot in `a` overlaps any slot in `b`.
pub fn has_conflict<A, B>(a: &[A], b: &[B]) -> bool
where
  A: AsRef<TimeSlot>,
  B: AsRef<TimeSlot>,
{
  find_conflict(a, b).is_some()
}

/// The first overlapping pair `(from a, from b)`, if any.
///
/// Generic over anything that carries a slot, so callers get back the owning
/// entity (e.g. a [`Commitment`](crate::model::Commitment) names the student).
pub fn find_conflict<'a, 'b, A, B>(a: &'a [A], b: &'b [B]) -> Option<(&'a A, &'b B)>
where
  A: AsRef<TimeSlot>,
  B: AsRef<TimeSlot>,
{
  a.iter().find_map(|x| {
    b.iter()
      .find(|y| x.as_ref().overlaps(y.as_ref()))
      .map(|y| (x, y))
  })
}

/// The first pair of overlapping slots owned by *different* courses.
///
/// Slots of the same course are never compared with each other.
pub fn find_cross_course_conflict(
  slots: &[CourseSlot],
) -> Option<(&CourseSlot, &CourseSlot)> {
  slots.iter().enumerate().find_map(|(i, x)| {
    slots[i + 1..]
      .iter()
      .find(|y| x.course_id != y.course_id && x.slot.overlaps(&y.slot))
      .map(|y| (x, y))
  })
}
