//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Weekdays are stored as their full English name. Times of day are stored as
//! integer seconds since midnight so that SQL comparisons and `ORDER BY` are
//! numeric.

use registrar_core::{
  model::{Commitment, CourseSlot},
  schedule::{TimeOfDay, TimeSlot, Weekday},
};

use crate::{Error, Result};

// ─── Weekday ─────────────────────────────────────────────────────────────────

pub fn encode_weekday(day: Weekday) -> String { day.to_string() }

pub fn decode_weekday(s: &str) -> Result<Weekday> {
  Weekday::parse(s).map_err(|e| Error::Decode(e.to_string()))
}

// ─── TimeOfDay ───────────────────────────────────────────────────────────────

pub fn encode_time(t: TimeOfDay) -> i64 { i64::from(t.seconds()) }

pub fn decode_time(secs: i64) -> Result<TimeOfDay> {
  u32::try_from(secs)
    .map_err(|_| Error::Decode(format!("time of day out of range: {secs}")))
    .and_then(|s| TimeOfDay::from_seconds(s).map_err(|e| Error::Decode(e.to_string())))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw `course_timetables` columns.
pub struct RawSlot {
  pub day_of_week: String,
  pub start_time:  i64,
  pub end_time:    i64,
}

impl RawSlot {
  /// Read `day_of_week, start_time, end_time` starting at column `first`.
  pub fn from_row(row: &rusqlite::Row<'_>, first: usize) -> rusqlite::Result<Self> {
    Ok(RawSlot {
      day_of_week: row.get(first)?,
      start_time:  row.get(first + 1)?,
      end_time:    row.get(first + 2)?,
    })
  }

  pub fn into_slot(self) -> Result<TimeSlot> {
    Ok(TimeSlot {
      day_of_week: decode_weekday(&self.day_of_week)?,
      start_time:  decode_time(self.start_time)?,
      end_time:    decode_time(self.end_time)?,
    })
  }
}

/// A slot row joined with its course id.
pub struct RawCourseSlot {
  pub course_id: i64,
  pub slot:      RawSlot,
}

impl RawCourseSlot {
  pub fn into_course_slot(self) -> Result<CourseSlot> {
    Ok(CourseSlot { course_id: self.course_id, slot: self.slot.into_slot()? })
  }
}

/// A slot row joined through `student_courses`.
pub struct RawCommitment {
  pub student_id: i64,
  pub course_id:  i64,
  pub slot:       RawSlot,
}

impl RawCommitment {
  pub fn into_commitment(self) -> Result<Commitment> {
    Ok(Commitment {
      student_id: self.student_id,
      course_id:  self.course_id,
      slot:       self.slot.into_slot()?,
    })
  }
}

/// `?, ?, ?` with `n` placeholders, for `IN (...)` lists.
pub fn placeholders(n: usize) -> String { vec!["?"; n].join(", ") }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn time_round_trips_through_seconds() {
    let t = TimeOfDay::parse("13:45").unwrap();
    assert_eq!(encode_time(t), 49_500);
    assert_eq!(decode_time(49_500).unwrap(), t);
  }

  #[test]
  fn out_of_range_values_are_decode_errors() {
    assert!(matches!(decode_time(-1), Err(Error::Decode(_))));
    assert!(matches!(decode_time(86_400), Err(Error::Decode(_))));
    assert!(matches!(decode_weekday("Caturday"), Err(Error::Decode(_))));
  }

  #[test]
  fn placeholder_list() {
    assert_eq!(placeholders(1), "?");
    assert_eq!(placeholders(3), "?, ?, ?");
  }
}
