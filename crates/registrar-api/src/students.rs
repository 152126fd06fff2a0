//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | Optional `?collegeId=<id>` |
//! | `GET`  | `/students/:id/courses` | Enrolled courses with timetables; 404 if the student is unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::PathRejection},
};
use registrar_core::{
  model::{CollegeId, EnrolledCourse, Student, StudentId},
  store::RegistrarStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Shared by the student and course listings.
#[derive(Debug, Default, Deserialize)]
pub struct CollegeFilter {
  #[serde(rename = "collegeId", alias = "college_id")]
  pub college_id: Option<CollegeId>,
}

/// `GET /students[?collegeId=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(filter): Query<CollegeFilter>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: RegistrarStore,
{
  let students = store
    .list_students(filter.college_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(students))
}

/// `GET /students/:id/courses`
pub async fn schedule<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<StudentId>, PathRejection>,
) -> Result<Json<Vec<EnrolledCourse>>, ApiError>
where
  S: RegistrarStore,
{
  let Path(id) = id?;
  let schedule = store
    .student_schedule(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(schedule))
}
