//! Error type for `registrar-store-sqlite`.

use registrar_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rejection raised by a checked operation.
  #[error(transparent)]
  Core(#[from] registrar_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  /// A stored value could not be mapped back onto a domain type.
  #[error("decode error: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn rejection(&self) -> Option<&registrar_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
