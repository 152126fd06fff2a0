//! JSON REST API for Registrar.
//!
//! Exposes an axum [`Router`] backed by any
//! [`registrar_core::store::RegistrarStore`]. TLS, auth, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = registrar_api::api_router(Arc::new(store));
//! ```

pub mod colleges;
pub mod courses;
pub mod enrollment;
pub mod error;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use registrar_core::store::RegistrarStore;
use serde::Serialize;

pub use error::ApiError;

/// Success body for the mutating endpoints: a human-readable message plus the
/// operation's result fields.
#[derive(Debug, Serialize)]
pub struct Acknowledged<T> {
  pub message: &'static str,
  #[serde(flatten)]
  pub detail:  T,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RegistrarStore + 'static,
{
  Router::new()
    // Checked writes
    .route("/enroll", post(enrollment::enroll::<S>))
    .route(
      "/courses/{id}/timetable",
      get(courses::timetable::<S>).put(courses::assign_timetable::<S>),
    )
    // Reads
    .route("/colleges", get(colleges::list::<S>))
    .route("/students", get(students::list::<S>))
    .route("/students/{id}/courses", get(students::schedule::<S>))
    .route("/courses", get(courses::list::<S>))
    .with_state(store)
}
