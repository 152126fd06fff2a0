//! Core types and trait definitions for the Registrar enrollment service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the domain model, the slot-overlap checker, and the two checked operations
//! (timetable assignment and enrollment) expressed over a [`gateway::Gateway`].

pub mod conflict;
pub mod enrollment;
pub mod error;
pub mod gateway;
pub mod model;
pub mod schedule;
pub mod store;
pub mod timetable;

pub use error::{Error, ErrorKind, Result};
