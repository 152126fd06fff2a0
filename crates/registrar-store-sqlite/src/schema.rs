//! SQL schema for the Registrar SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS colleges (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id          INTEGER PRIMARY KEY,
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    id          INTEGER PRIMARY KEY,
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    code        TEXT NOT NULL
);

-- Replaced wholesale on every timetable assignment; never edited in place.
CREATE TABLE IF NOT EXISTS course_timetables (
    id           INTEGER PRIMARY KEY,
    course_id    INTEGER NOT NULL REFERENCES courses(id),
    day_of_week  TEXT    NOT NULL,   -- 'Monday' .. 'Sunday'
    start_time   INTEGER NOT NULL,   -- seconds since midnight
    end_time     INTEGER NOT NULL,   -- seconds since midnight, exclusive
    CHECK (start_time < end_time)
);

-- Enrollment rows are written once and never updated.
CREATE TABLE IF NOT EXISTS student_courses (
    student_id  INTEGER NOT NULL REFERENCES students(id),
    course_id   INTEGER NOT NULL REFERENCES courses(id),
    PRIMARY KEY (student_id, course_id)
);

CREATE INDEX IF NOT EXISTS students_college_idx   ON students(college_id);
CREATE INDEX IF NOT EXISTS courses_college_idx    ON courses(college_id);
CREATE INDEX IF NOT EXISTS timetables_course_idx  ON course_timetables(course_id);
CREATE INDEX IF NOT EXISTS student_courses_course_idx ON student_courses(course_id);

PRAGMA user_version = 1;
";
