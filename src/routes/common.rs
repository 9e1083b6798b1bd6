//! Service routes next to the generated resources: liveness and an index of mounted resources.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct InfoBody {
    name: &'static str,
    version: &'static str,
    resources: Vec<String>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn info(State(resources): State<Arc<[String]>>) -> Json<InfoBody> {
    Json(InfoBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        resources: resources.to_vec(),
    })
}

/// GET /health, and GET /info listing the base paths of the mounted resources.
pub fn common_routes<I, P>(resource_paths: I) -> Router
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let resources: Arc<[String]> = resource_paths.into_iter().map(Into::into).collect();
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .with_state(resources)
}
