//! [`SqliteGateway`] — the [`Gateway`] implementation over an open SQLite
//! transaction.

use std::collections::HashSet;

use rusqlite::{OptionalExtension as _, params, params_from_iter};

use registrar_core::{
  gateway::Gateway,
  model::{Commitment, Course, CourseId, CourseSlot, Student, StudentId},
  schedule::TimeSlot,
};

use crate::{
  Error, Result,
  encode::{RawCommitment, RawCourseSlot, RawSlot, encode_time, encode_weekday, placeholders},
};

/// Ids bound per `IN (...)` list. SQLite caps the bound parameters of one
/// statement (999 on older builds), so longer id sets are queried in chunks.
const IN_LIST_CHUNK: usize = 500;

/// Record access bound to one connection (in practice a
/// [`rusqlite::Transaction`], which derefs to a connection).
///
/// The gateway never commits; the caller owns the transaction.
pub struct SqliteGateway<'c> {
  conn: &'c rusqlite::Connection,
}

impl<'c> SqliteGateway<'c> {
  pub fn new(conn: &'c rusqlite::Connection) -> Self { Self { conn } }
}

fn course_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Course> {
  Ok(Course { id: row.get(0)?, college_id: row.get(1)?, code: row.get(2)? })
}

fn commitment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCommitment> {
  Ok(RawCommitment {
    student_id: row.get(0)?,
    course_id:  row.get(1)?,
    slot:       RawSlot::from_row(row, 2)?,
  })
}

impl Gateway for SqliteGateway<'_> {
  type Error = Error;

  fn course(&mut self, id: CourseId) -> Result<Option<Course>> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT id, college_id, code FROM courses WHERE id = ?1",
          params![id],
          course_from_row,
        )
        .optional()?,
    )
  }

  fn student(&mut self, id: StudentId) -> Result<Option<Student>> {
    Ok(
      self
        .conn
        .query_row(
          "SELECT id, college_id, name FROM students WHERE id = ?1",
          params![id],
          |row| Ok(Student { id: row.get(0)?, college_id: row.get(1)?, name: row.get(2)? }),
        )
        .optional()?,
    )
  }

  fn courses(&mut self, ids: &[CourseId]) -> Result<Vec<Course>> {
    let mut rows = Vec::new();
    for chunk in ids.chunks(IN_LIST_CHUNK) {
      let sql = format!(
        "SELECT id, college_id, code FROM courses WHERE id IN ({})",
        placeholders(chunk.len())
      );
      let mut stmt = self.conn.prepare_cached(&sql)?;
      for row in stmt.query_map(params_from_iter(chunk), course_from_row)? {
        rows.push(row?);
      }
    }
    rows.sort_by_key(|c| c.id);
    Ok(rows)
  }

  fn enrolled_students(&mut self, course_id: CourseId) -> Result<Vec<StudentId>> {
    let mut stmt = self.conn.prepare_cached(
      "SELECT DISTINCT student_id FROM student_courses
       WHERE course_id = ?1
       ORDER BY student_id",
    )?;
    let rows = stmt
      .query_map(params![course_id], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<StudentId>>>()?;
    Ok(rows)
  }

  fn commitments_outside(
    &mut self,
    students: &[StudentId],
    course_id: CourseId,
  ) -> Result<Vec<Commitment>> {
    let mut raws = Vec::new();
    for chunk in students.chunks(IN_LIST_CHUNK) {
      let sql = format!(
        "SELECT sc.student_id, ct.course_id, ct.day_of_week, ct.start_time, ct.end_time
         FROM student_courses sc
         JOIN course_timetables ct ON ct.course_id = sc.course_id
         WHERE sc.course_id != ? AND sc.student_id IN ({})
         ORDER BY sc.student_id, ct.course_id, ct.id",
        placeholders(chunk.len())
      );
      let mut stmt = self.conn.prepare_cached(&sql)?;
      let rows = stmt.query_map(
        params_from_iter(std::iter::once(&course_id).chain(chunk)),
        commitment_from_row,
      )?;
      for row in rows {
        raws.push(row?);
      }
    }
    raws.into_iter().map(RawCommitment::into_commitment).collect()
  }

  fn course_slots(&mut self, ids: &[CourseId]) -> Result<Vec<CourseSlot>> {
    let mut raws = Vec::new();
    for chunk in ids.chunks(IN_LIST_CHUNK) {
      let sql = format!(
        "SELECT course_id, day_of_week, start_time, end_time
         FROM course_timetables
         WHERE course_id IN ({})
         ORDER BY course_id, id",
        placeholders(chunk.len())
      );
      let mut stmt = self.conn.prepare_cached(&sql)?;
      let rows = stmt.query_map(params_from_iter(chunk), |row| {
        Ok(RawCourseSlot { course_id: row.get(0)?, slot: RawSlot::from_row(row, 1)? })
      })?;
      for row in rows {
        raws.push(row?);
      }
    }
    // Chunks follow request order; keep each course's slots together by id.
    raws.sort_by_key(|r| r.course_id);
    raws.into_iter().map(RawCourseSlot::into_course_slot).collect()
  }

  fn student_commitments(
    &mut self,
    student_id: StudentId,
    excluding: &[CourseId],
  ) -> Result<Vec<Commitment>> {
    let mut stmt = self.conn.prepare_cached(
      "SELECT sc.student_id, ct.course_id, ct.day_of_week, ct.start_time, ct.end_time
       FROM student_courses sc
       JOIN course_timetables ct ON ct.course_id = sc.course_id
       WHERE sc.student_id = ?1
       ORDER BY ct.course_id, ct.id",
    )?;
    let raws = stmt
      .query_map(params![student_id], commitment_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let excluded: HashSet<CourseId> = excluding.iter().copied().collect();
    raws
      .into_iter()
      .filter(|raw| !excluded.contains(&raw.course_id))
      .map(RawCommitment::into_commitment)
      .collect()
  }

  fn clear_timetable(&mut self, course_id: CourseId) -> Result<usize> {
    Ok(
      self
        .conn
        .execute("DELETE FROM course_timetables WHERE course_id = ?1", params![course_id])?,
    )
  }

  fn insert_slot(&mut self, course_id: CourseId, slot: &TimeSlot) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(
      "INSERT INTO course_timetables (course_id, day_of_week, start_time, end_time)
       VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
      course_id,
      encode_weekday(slot.day_of_week),
      encode_time(slot.start_time),
      encode_time(slot.end_time),
    ])?;
    Ok(())
  }

  fn insert_enrollment(&mut self, student_id: StudentId, course_id: CourseId) -> Result<bool> {
    let mut stmt = self.conn.prepare_cached(
      "INSERT INTO student_courses (student_id, course_id) VALUES (?1, ?2)
       ON CONFLICT DO NOTHING",
    )?;
    let inserted = stmt.execute(params![student_id, course_id])?;
    Ok(inserted == 1)
  }
}

/// Read a course's slots ordered by day of week then start time.
///
/// Day order is calendar order, not alphabetical, so it is applied after
/// decoding.
pub(crate) fn timetable_of(conn: &rusqlite::Connection, course_id: CourseId) -> Result<Vec<TimeSlot>> {
  let mut stmt = conn.prepare_cached(
    "SELECT day_of_week, start_time, end_time FROM course_timetables
     WHERE course_id = ?1
     ORDER BY start_time, id",
  )?;
  let raws = stmt
    .query_map(params![course_id], |row| RawSlot::from_row(row, 0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  let mut slots = raws.into_iter().map(RawSlot::into_slot).collect::<Result<Vec<_>>>()?;
  slots.sort_by_key(|s| (s.day_of_week, s.start_time));
  Ok(slots)
}
