//! [`SqliteStore`] — the SQLite implementation of [`RegistrarStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior, params};

use registrar_core::{
  enrollment,
  model::{
    College, CollegeId, Course, CourseId, EnrolledCourse, EnrollmentOutcome, Student,
    StudentId, TimetableUpdate,
  },
  schedule::TimeSlot,
  store::RegistrarStore,
  timetable,
};

use crate::{
  Result,
  gateway::{SqliteGateway, timetable_of},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Registrar store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialised on the connection's thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reference data ────────────────────────────────────────────────────
  //
  // Colleges, students and courses are administered outside the checked
  // operations; these inserts exist for seeding and tests.

  pub async fn add_college(&self, college: College) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO colleges (id, name) VALUES (?1, ?2)",
          params![college.id, college.name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_student(&self, student: Student) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (id, college_id, name) VALUES (?1, ?2, ?3)",
          params![student.id, student.college_id, student.name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_course(&self, course: Course) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO courses (id, college_id, code) VALUES (?1, ?2, ?3)",
          params![course.id, course.college_id, course.code],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RegistrarStore impl ─────────────────────────────────────────────────────

impl RegistrarStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_colleges(&self) -> Result<Vec<College>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM colleges ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(College { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_students(&self, college_id: Option<CollegeId>) -> Result<Vec<Student>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, college_id, name FROM students
           WHERE ?1 IS NULL OR college_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(params![college_id], |row| {
            Ok(Student { id: row.get(0)?, college_id: row.get(1)?, name: row.get(2)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_courses(&self, college_id: Option<CollegeId>) -> Result<Vec<Course>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, college_id, code FROM courses
           WHERE ?1 IS NULL OR college_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(params![college_id], |row| {
            Ok(Course { id: row.get(0)?, college_id: row.get(1)?, code: row.get(2)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn student_schedule(&self, student_id: StudentId) -> Result<Option<Vec<EnrolledCourse>>> {
    self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row("SELECT 1 FROM students WHERE id = ?1", params![student_id], |_| Ok(()))
          .optional()?
          .is_some();
        if !exists {
          return Ok(Ok(None));
        }

        let mut stmt = conn.prepare(
          "SELECT c.id, c.code FROM student_courses sc
           JOIN courses c ON c.id = sc.course_id
           WHERE sc.student_id = ?1
           ORDER BY c.id",
        )?;
        let courses = stmt
          .query_map(params![student_id], |row| {
            Ok((row.get::<_, CourseId>(0)?, row.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let schedule = courses
          .into_iter()
          .map(|(course_id, code)| -> Result<EnrolledCourse> {
            Ok(EnrolledCourse { course_id, code, timetable: timetable_of(conn, course_id)? })
          })
          .collect::<Result<Vec<_>>>();
        Ok(schedule.map(Some))
      })
      .await?
  }

  async fn course_timetable(&self, course_id: CourseId) -> Result<Option<Vec<TimeSlot>>> {
    self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row("SELECT 1 FROM courses WHERE id = ?1", params![course_id], |_| Ok(()))
          .optional()?
          .is_some();
        if !exists {
          return Ok(Ok(None));
        }
        Ok(timetable_of(conn, course_id).map(Some))
      })
      .await?
  }

  // ── Checked writes ────────────────────────────────────────────────────────

  async fn assign_timetable(
    &self,
    course_id: CourseId,
    slots: Vec<TimeSlot>,
  ) -> Result<TimetableUpdate> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = timetable::assign_timetable(&mut SqliteGateway::new(&tx), course_id, &slots);
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await?;

    match &outcome {
      Ok(update) => tracing::info!(
        course_id,
        removed = update.removed,
        inserted = update.inserted,
        "timetable replaced"
      ),
      Err(e) => tracing::info!(course_id, error = %e, "timetable update rejected"),
    }
    outcome
  }

  async fn enroll(
    &self,
    student_id: StudentId,
    course_ids: Vec<CourseId>,
  ) -> Result<EnrollmentOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = enrollment::enroll(&mut SqliteGateway::new(&tx), student_id, &course_ids);
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await?;

    match &outcome {
      Ok(o) => tracing::info!(
        student_id,
        enrolled = ?o.enrolled,
        already_enrolled = ?o.already_enrolled,
        "student enrolled"
      ),
      Err(e) => tracing::info!(student_id, error = %e, "enrollment rejected"),
    }
    outcome
  }
}
