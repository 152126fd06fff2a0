//! HTTP server wiring for Registrar.
//!
//! Holds the runtime configuration, the top-level router (API plus request
//! tracing), and the JSON seed loader used by the `registrar` binary.

pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use registrar_core::store::RegistrarStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `REGISTRAR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "127.0.0.1";
  pub const DEFAULT_PORT: u16 = 3000;
  pub const DEFAULT_STORE_PATH: &'static str = "registrar.db";

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the JSON API with a request trace layer.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RegistrarStore + 'static,
{
  registrar_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use registrar_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[tokio::test]
  async fn router_serves_api_routes() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let resp = router(store)
      .oneshot(Request::builder().uri("/colleges").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn unknown_route_is_404() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let resp = router(store)
      .oneshot(Request::builder().uri("/api-docs").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn address_joins_host_and_port() {
    let cfg = ServerConfig {
      host:       "0.0.0.0".into(),
      port:       8080,
      store_path: PathBuf::from(":memory:"),
    };
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }
}
