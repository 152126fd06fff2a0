//! Integration tests for `SqliteStore` against an in-memory database.

use registrar_core::{
  ErrorKind,
  model::{College, Course, Student},
  schedule::TimeSlot,
  store::{RegistrarStore, StoreError},
};

use crate::{Error, SqliteStore};

fn slot(day: &str, start: &str, end: &str) -> TimeSlot {
  TimeSlot::parse(day, start, end).unwrap()
}

/// Two colleges; students 1–2 and courses 10–13 in college 1, student 3 and
/// course 20 in college 2.
async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");

  for (id, name) in [(1, "North"), (2, "South")] {
    s.add_college(College { id, name: name.into() }).await.unwrap();
  }
  for (id, college_id, name) in [(1, 1, "Ada"), (2, 1, "Brian"), (3, 2, "Chen")] {
    s.add_student(Student { id, college_id, name: name.into() }).await.unwrap();
  }
  for (id, college_id, code) in
    [(10, 1, "CS101"), (11, 1, "MA101"), (12, 1, "PH101"), (13, 1, "EN101"), (20, 2, "CS201")]
  {
    s.add_course(Course { id, college_id, code: code.into() }).await.unwrap();
  }
  s
}

fn kind(err: &Error) -> Option<ErrorKind> { err.rejection().map(|e| e.kind()) }

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_colleges_ordered() {
  let s = store().await;
  let colleges = s.list_colleges().await.unwrap();
  let names: Vec<_> = colleges.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["North", "South"]);
}

#[tokio::test]
async fn list_students_all_and_filtered() {
  let s = store().await;
  assert_eq!(s.list_students(None).await.unwrap().len(), 3);

  let north = s.list_students(Some(1)).await.unwrap();
  assert_eq!(north.iter().map(|st| st.id).collect::<Vec<_>>(), [1, 2]);
  assert!(north.iter().all(|st| st.college_id == 1));
}

#[tokio::test]
async fn list_courses_filtered() {
  let s = store().await;
  let south = s.list_courses(Some(2)).await.unwrap();
  assert_eq!(south.len(), 1);
  assert_eq!(south[0].code, "CS201");
}

#[tokio::test]
async fn schedule_of_unknown_student_is_none() {
  let s = store().await;
  assert!(s.student_schedule(99).await.unwrap().is_none());
  assert!(s.course_timetable(99).await.unwrap().is_none());
}

#[tokio::test]
async fn schedule_lists_courses_with_calendar_ordered_slots() {
  let s = store().await;
  s.assign_timetable(10, vec![
    slot("Wednesday", "10:00", "11:00"),
    slot("Monday", "14:00", "15:00"),
    slot("Monday", "09:00", "10:00"),
  ])
  .await
  .unwrap();
  s.enroll(1, vec![11, 10]).await.unwrap();

  let schedule = s.student_schedule(1).await.unwrap().unwrap();
  assert_eq!(schedule.iter().map(|c| c.course_id).collect::<Vec<_>>(), [10, 11]);
  assert_eq!(schedule[0].code, "CS101");
  assert_eq!(schedule[0].timetable, [
    slot("Monday", "09:00", "10:00"),
    slot("Monday", "14:00", "15:00"),
    slot("Wednesday", "10:00", "11:00"),
  ]);
  assert!(schedule[1].timetable.is_empty());
}

// ─── Timetable assignment ────────────────────────────────────────────────────

#[tokio::test]
async fn assign_replaces_whole_timetable() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Mon", "09:00", "10:00"), slot("Tue", "09:00", "10:00")])
    .await
    .unwrap();

  let update = s
    .assign_timetable(10, vec![slot("Fri", "13:00", "14:00")])
    .await
    .unwrap();
  assert_eq!(update.removed, 2);
  assert_eq!(update.inserted, 1);
  assert_eq!(s.course_timetable(10).await.unwrap().unwrap(), [slot("Fri", "13:00", "14:00")]);
}

#[tokio::test]
async fn assign_unknown_course_is_not_found() {
  let s = store().await;
  let err = s
    .assign_timetable(99, vec![slot("Mon", "09:00", "10:00")])
    .await
    .unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn assign_conflict_rolls_back_everything() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Mon", "08:00", "09:00")]).await.unwrap();
  s.assign_timetable(11, vec![slot("Wed", "10:00", "11:00")]).await.unwrap();
  s.enroll(1, vec![10, 11]).await.unwrap();

  let proposed = vec![
    slot("Mon", "12:00", "13:00"),
    slot("Tue", "12:00", "13:00"),
    slot("Wed", "10:30", "11:30"),
    slot("Thu", "12:00", "13:00"),
    slot("Fri", "12:00", "13:00"),
  ];
  let err = s.assign_timetable(10, proposed).await.unwrap_err();

  assert_eq!(kind(&err), Some(ErrorKind::Conflict));
  assert!(err.to_string().contains("student 1"), "{err}");
  assert_eq!(s.course_timetable(10).await.unwrap().unwrap(), [slot("Mon", "08:00", "09:00")]);
}

#[tokio::test]
async fn assign_with_no_students_accepts_overlapping_slots() {
  let s = store().await;
  let update = s
    .assign_timetable(12, vec![slot("Mon", "09:00", "11:00"), slot("Mon", "10:00", "12:00")])
    .await
    .unwrap();
  assert_eq!(update.inserted, 2);
}

#[tokio::test]
async fn assign_rejects_empty_list() {
  let s = store().await;
  let err = s.assign_timetable(10, vec![]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::Validation));
}

// ─── Enrollment ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn enroll_conflicting_course_is_rejected() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Wed", "10:00", "11:00")]).await.unwrap();
  s.assign_timetable(11, vec![slot("Wed", "10:30", "11:30")]).await.unwrap();
  s.enroll(1, vec![10]).await.unwrap();

  let err = s.enroll(1, vec![11]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::Conflict));

  let schedule = s.student_schedule(1).await.unwrap().unwrap();
  assert_eq!(schedule.iter().map(|c| c.course_id).collect::<Vec<_>>(), [10]);
}

#[tokio::test]
async fn enroll_twice_keeps_one_row() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Mon", "09:00", "10:00")]).await.unwrap();

  let first = s.enroll(2, vec![10]).await.unwrap();
  let second = s.enroll(2, vec![10]).await.unwrap();
  assert_eq!(first.enrolled, [10]);
  assert_eq!(second.already_enrolled, [10]);

  assert_eq!(s.student_schedule(2).await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn enroll_cross_college_persists_nothing() {
  let s = store().await;
  let err = s.enroll(3, vec![20, 10]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::Validation));
  assert!(err.to_string().contains("course 10"), "{err}");
  assert!(s.student_schedule(3).await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn enroll_missing_course_persists_nothing() {
  let s = store().await;
  let err = s.enroll(1, vec![10, 404]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::NotFound));
  assert!(s.student_schedule(1).await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn enroll_mutually_clashing_courses_is_rejected() {
  let s = store().await;
  s.assign_timetable(12, vec![slot("Thu", "13:00", "14:00")]).await.unwrap();
  s.assign_timetable(13, vec![slot("Thu", "13:30", "15:00")]).await.unwrap();

  let err = s.enroll(2, vec![12, 13]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::Conflict));
  assert!(s.student_schedule(2).await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn enroll_unknown_student_is_not_found() {
  let s = store().await;
  let err = s.enroll(42, vec![10]).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn storage_errors_carry_no_rejection() {
  let s = store().await;
  // Duplicate primary key: a storage failure, not a domain rejection.
  let err = s
    .add_college(College { id: 1, name: "Again".into() })
    .await
    .unwrap_err();
  assert!(err.rejection().is_none());
}

// ─── Large id sets ───────────────────────────────────────────────────────────

#[tokio::test]
async fn enroll_more_ids_than_sqlite_binds_reports_missing_courses() {
  let s = store().await;
  let requested: Vec<i64> = (1..=40_000).collect();

  let err = s.enroll(1, requested).await.unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::NotFound), "{err}");
  match err {
    Error::Core(registrar_core::Error::CoursesNotFound(missing)) => {
      assert_eq!(missing.len(), 40_000 - 5);
      assert!(!missing.contains(&10) && !missing.contains(&20));
    }
    other => panic!("unexpected error: {other}"),
  }
  assert!(s.student_schedule(1).await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn assign_checks_every_enrolled_student_past_one_id_chunk() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Mon", "08:00", "09:00")]).await.unwrap();
  s.assign_timetable(11, vec![slot("Tue", "15:00", "16:00")]).await.unwrap();

  let last = 100 + 1_200;
  for id in 101..=last {
    s.add_student(Student { id, college_id: 1, name: format!("student {id}") })
      .await
      .unwrap();
    s.enroll(id, vec![10]).await.unwrap();
  }
  s.enroll(last, vec![11]).await.unwrap();

  let err = s
    .assign_timetable(10, vec![slot("Tue", "15:30", "16:30")])
    .await
    .unwrap_err();
  assert_eq!(kind(&err), Some(ErrorKind::Conflict));
  assert!(err.to_string().contains(&format!("student {last}")), "{err}");
  assert_eq!(s.course_timetable(10).await.unwrap().unwrap(), [slot("Mon", "08:00", "09:00")]);
}

// ─── Concurrent writes ───────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_clashing_enrollments_commit_exactly_one() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Wed", "10:00", "11:00")]).await.unwrap();
  s.assign_timetable(11, vec![slot("Wed", "10:30", "11:30")]).await.unwrap();

  let (a, b) = tokio::join!(s.enroll(1, vec![10]), s.enroll(1, vec![11]));
  assert!(a.is_ok() ^ b.is_ok(), "a: {a:?}, b: {b:?}");
  let rejected = a.err().or(b.err()).unwrap();
  assert_eq!(kind(&rejected), Some(ErrorKind::Conflict));

  assert_eq!(s.student_schedule(1).await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_enroll_and_timetable_change_commit_exactly_one() {
  let s = store().await;
  s.assign_timetable(10, vec![slot("Wed", "10:00", "11:00")]).await.unwrap();
  s.assign_timetable(11, vec![slot("Thu", "10:00", "11:00")]).await.unwrap();
  s.enroll(1, vec![10]).await.unwrap();

  let (enrolled, reassigned) = tokio::join!(
    s.enroll(1, vec![11]),
    s.assign_timetable(11, vec![slot("Wed", "10:30", "11:30")]),
  );
  assert!(enrolled.is_ok() ^ reassigned.is_ok(), "{enrolled:?} / {reassigned:?}");

  let schedule = s.student_schedule(1).await.unwrap().unwrap();
  let slots: Vec<TimeSlot> = schedule.into_iter().flat_map(|c| c.timetable).collect();
  for (i, a) in slots.iter().enumerate() {
    for b in &slots[i + 1..] {
      assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
    }
  }
}
