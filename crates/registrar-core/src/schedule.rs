//! Weekly schedule primitives: weekdays, times of day, and time slots.
//!
//! A slot is a recurring weekly interval. Times are normalised to seconds
//! since midnight so that ordering is plain integer ordering, independent of
//! how the time was written on the wire.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike as _};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Weekday ─────────────────────────────────────────────────────────────────

/// Day of the week a slot recurs on.
///
/// Parsing is case-insensitive and accepts three-letter abbreviations;
/// rendering always uses the full English name.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String")]
pub enum Weekday {
  #[strum(to_string = "Monday", serialize = "Mon")]
  Monday,
  #[strum(to_string = "Tuesday", serialize = "Tue")]
  Tuesday,
  #[strum(to_string = "Wednesday", serialize = "Wed")]
  Wednesday,
  #[strum(to_string = "Thursday", serialize = "Thu")]
  Thursday,
  #[strum(to_string = "Friday", serialize = "Fri")]
  Friday,
  #[strum(to_string = "Saturday", serialize = "Sat")]
  Saturday,
  #[strum(to_string = "Sunday", serialize = "Sun")]
  Sunday,
}

impl Weekday {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s.trim()).map_err(|_| Error::InvalidWeekday(s.to_owned()))
  }
}

impl TryFrom<String> for Weekday {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

// ─── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time within a day, stored as seconds since midnight.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
  const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

  pub fn from_seconds(seconds: u32) -> Result<Self> {
    if seconds >= Self::SECONDS_PER_DAY {
      return Err(Error::InvalidTime(seconds.to_string()));
    }
    Ok(Self(seconds))
  }

  pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
    if hour >= 24 || minute >= 60 {
      return Err(Error::InvalidTime(format!("{hour}:{minute}")));
    }
    Ok(Self(hour * 3600 + minute * 60))
  }

  /// Parse `HH:MM` or `HH:MM:SS` (24-hour clock).
  pub fn parse(s: &str) -> Result<Self> {
    let trimmed = s.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
      .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
      .map_err(|_| Error::InvalidTime(s.to_owned()))?;
    Ok(Self(time.num_seconds_from_midnight()))
  }

  pub fn seconds(self) -> u32 { self.0 }
}

impl fmt::Display for TimeOfDay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (h, m, s) = (self.0 / 3600, self.0 / 60 % 60, self.0 % 60);
    if s == 0 {
      write!(f, "{h:02}:{m:02}")
    } else {
      write!(f, "{h:02}:{m:02}:{s:02}")
    }
  }
}

impl FromStr for TimeOfDay {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for TimeOfDay {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<TimeOfDay> for String {
  fn from(t: TimeOfDay) -> Self { t.to_string() }
}

// ─── TimeSlot ────────────────────────────────────────────────────────────────

/// One weekly meeting of a course: `[start_time, end_time)` on `day_of_week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
  pub day_of_week: Weekday,
  pub start_time:  TimeOfDay,
  pub end_time:    TimeOfDay,
}

impl TimeSlot {
  /// Build a slot, rejecting empty or inverted ranges.
  pub fn new(day_of_week: Weekday, start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
    let slot = Self { day_of_week, start_time, end_time };
    slot.validate()?;
    Ok(slot)
  }

  /// Parse the three wire fields of a slot.
  pub fn parse(day_of_week: &str, start_time: &str, end_time: &str) -> Result<Self> {
    Self::new(
      Weekday::parse(day_of_week)?,
      TimeOfDay::parse(start_time)?,
      TimeOfDay::parse(end_time)?,
    )
  }

  pub fn validate(&self) -> Result<()> {
    if self.start_time >= self.end_time {
      return Err(Error::InvertedSlot(*self));
    }
    Ok(())
  }

  /// Half-open overlap: slots that merely touch do not overlap.
  pub fn overlaps(&self, other: &TimeSlot) -> bool {
    self.day_of_week == other.day_of_week
      && self.start_time < other.end_time
      && other.start_time < self.end_time
  }
}

impl AsRef<TimeSlot> for TimeSlot {
  fn as_ref(&self) -> &TimeSlot { self }
}
