//! Handler for `POST /enroll`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use registrar_core::{
  model::{CourseId, EnrollmentOutcome, StudentId},
  store::RegistrarStore,
};
use serde::Deserialize;

use crate::{Acknowledged, error::ApiError};

/// JSON body accepted by `POST /enroll`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialisation failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
  #[serde(alias = "student_id")]
  pub student_id: Option<StudentId>,
  #[serde(alias = "course_ids")]
  pub course_ids: Option<Vec<CourseId>>,
}

/// `POST /enroll` — body: `{"studentId":1,"courseIds":[1,2]}`
pub async fn enroll<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<EnrollBody>, JsonRejection>,
) -> Result<Json<Acknowledged<EnrollmentOutcome>>, ApiError>
where
  S: RegistrarStore,
{
  let Json(body) = body?;
  let (Some(student_id), Some(course_ids)) = (body.student_id, body.course_ids) else {
    return Err(ApiError::BadRequest(
      "invalid request: studentId and courseIds are required".into(),
    ));
  };

  let outcome = store
    .enroll(student_id, course_ids)
    .await
    .map_err(ApiError::from_store)?;

  Ok(Json(Acknowledged { message: "Enrolled successfully", detail: outcome }))
}
