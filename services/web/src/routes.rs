use crate::infra::AppState;
use crate::pages::{self, StaticPage};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Extension, Json};
use pioneer_site::intake::{intake_router, RecordStore, SubmissionService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn site_router<S>(submissions: Arc<SubmissionService<S>>) -> axum::Router
where
    S: RecordStore + 'static,
{
    let mut router = intake_router(submissions)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint));

    for page in StaticPage::ALL {
        router = router.route(page.path(), get(move || static_page(page)));
    }

    router.fallback(not_found)
}

async fn static_page(page: StaticPage) -> Html<String> {
    Html(pages::render(page))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found()))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
