//! Handlers for `/courses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | Optional `?collegeId=<id>` |
//! | `GET`  | `/courses/:id/timetable` | Slots ordered by day, then start time |
//! | `PUT`  | `/courses/:id/timetable` | Body: array of [`SlotBody`]; replaces every slot |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use registrar_core::{
  model::{Course, CourseId, TimetableUpdate},
  schedule::TimeSlot,
  store::RegistrarStore,
};
use serde::Deserialize;

use crate::{Acknowledged, error::ApiError, students::CollegeFilter};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /courses[?collegeId=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(filter): Query<CollegeFilter>,
) -> Result<Json<Vec<Course>>, ApiError>
where
  S: RegistrarStore,
{
  let courses = store
    .list_courses(filter.college_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(courses))
}

// ─── Timetable ────────────────────────────────────────────────────────────────

/// `GET /courses/:id/timetable`
pub async fn timetable<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<CourseId>, PathRejection>,
) -> Result<Json<Vec<TimeSlot>>, ApiError>
where
  S: RegistrarStore,
{
  let Path(id) = id?;
  let slots = store
    .course_timetable(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("course {id} not found")))?;
  Ok(Json(slots))
}

/// One slot as sent by clients. Fields are parsed leniently (`"Mon"`,
/// `"9:00"`, `"09:00:00"`) and validated before the store is touched.
#[derive(Debug, Deserialize)]
pub struct SlotBody {
  pub day_of_week: String,
  pub start_time:  String,
  pub end_time:    String,
}

impl TryFrom<SlotBody> for TimeSlot {
  type Error = registrar_core::Error;

  fn try_from(b: SlotBody) -> Result<Self, Self::Error> {
    TimeSlot::parse(&b.day_of_week, &b.start_time, &b.end_time)
  }
}

/// `PUT /courses/:id/timetable` — body: `[{"day_of_week":"Monday","start_time":"09:00","end_time":"10:00"}]`
pub async fn assign_timetable<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<CourseId>, PathRejection>,
  body: Result<Json<Vec<SlotBody>>, JsonRejection>,
) -> Result<Json<Acknowledged<TimetableUpdate>>, ApiError>
where
  S: RegistrarStore,
{
  let Path(id) = id?;
  let Json(body) = body?;
  let slots = body
    .into_iter()
    .map(TimeSlot::try_from)
    .collect::<Result<Vec<_>, _>>()?;

  let update = store
    .assign_timetable(id, slots)
    .await
    .map_err(ApiError::from_store)?;

  Ok(Json(Acknowledged { message: "Timetable updated successfully", detail: update }))
}
