//! Common HTTP surface every blade exposes (spec.md §4.7, §4.8): `GET /`
//! status and `POST /` intent receiver.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use crate::domain::models::Intent;

use super::context::BladeContext;
use super::executor;
use super::status;

pub fn router(ctx: Arc<BladeContext>) -> Router {
    Router::new()
        .route("/", get(get_status).post(post_intent))
        .with_state(ctx)
}

async fn get_status(State(ctx): State<Arc<BladeContext>>) -> Json<serde_json::Value> {
    Json(status::build_status(&ctx).await)
}

async fn post_intent(
    State(ctx): State<Arc<BladeContext>>,
    Json(intent): Json<Intent>,
) -> impl IntoResponse {
    if let Err(e) = intent.validate() {
        warn!(error = %e, "rejected malformed intent");
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "MalformedIntent"})));
    }

    executor::handle_intent(ctx.clone(), intent).await;
    (StatusCode::OK, Json(status::build_status(&ctx).await))
}

pub async fn serve(ctx: Arc<BladeContext>, addr: &str) -> anyhow::Result<()> {
    let app = router(ctx);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "blade HTTP surface listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::process::ProcessModuleInstaller;
    use crate::blade::scraping_module::EmptyModuleRegistry;
    use crate::domain::models::{BladeDecl, BladeRole, IntentParams, Topology};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn blade() -> BladeDecl {
        BladeDecl {
            name: "A".into(),
            blade: BladeRole::Orchestrator,
            host: "127.0.0.1".into(),
            port: 8000,
            managed: true,
            venv: String::new(),
        }
    }

    fn ctx() -> Arc<BladeContext> {
        let dir = tempfile::tempdir().unwrap();
        Arc::new(BladeContext::new(
            blade(),
            Topology {
                blades: vec![blade()],
                static_cluster_parameters: Default::default(),
            },
            Arc::new(ProcessModuleInstaller::new(
                "true".to_string(),
                dir.path().to_path_buf(),
            )),
            Arc::new(EmptyModuleRegistry),
            vec!["swarmctl-blade".to_string()],
        ))
    }

    #[tokio::test]
    async fn get_root_returns_status_with_blade_and_topology() {
        let app = router(ctx());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn post_root_rejects_malformed_intent() {
        let app = router(ctx());
        let intent = Intent {
            id: "1".into(),
            host: String::new(),
            blade: BladeRole::Orchestrator,
            version: "v1".into(),
            params: IntentParams::Orchestrator,
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&intent).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "MalformedIntent");
    }

    #[tokio::test]
    async fn post_root_accepts_well_formed_intent() {
        let app = router(ctx());
        let intent = Intent {
            id: "1:127.0.0.1:8000".into(),
            host: "127.0.0.1:8000".into(),
            blade: BladeRole::Orchestrator,
            version: "v1.0.0".into(),
            params: IntentParams::Orchestrator,
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&intent).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["current_intent"]["id"], "1:127.0.0.1:8000");
    }
}
