use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use adselect::ads::domain::GeneratedAdvertisement;
use adselect::ads::selection::AdvertisementSelector;
use adselect::ads::store::{ContentStore, TargetingGroupStore};

use crate::infra::AppState;

pub(crate) fn with_selection_routes<C, T>(
    selector: Arc<AdvertisementSelector<C, T>>,
) -> Router
where
    C: ContentStore + 'static,
    T: TargetingGroupStore + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/marketplaces/:marketplace_id/advertisement",
            get(advertisement_handler::<C, T>),
        )
        .with_state(selector)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvertisementQuery {
    /// Blank or missing means an unrecognized visitor; selection still runs.
    #[serde(default)]
    pub(crate) customer_id: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum AdvertisementResponse {
    Selected {
        id: String,
        content_id: String,
        render_content: String,
    },
    Empty,
}

pub(crate) async fn advertisement_handler<C, T>(
    State(selector): State<Arc<AdvertisementSelector<C, T>>>,
    Path(marketplace_id): Path<String>,
    Query(query): Query<AdvertisementQuery>,
) -> Response
where
    C: ContentStore + 'static,
    T: TargetingGroupStore + 'static,
{
    match selector
        .select_advertisement(&query.customer_id, &marketplace_id)
        .await
    {
        Ok(GeneratedAdvertisement::Render { id, content }) => (
            StatusCode::OK,
            Json(AdvertisementResponse::Selected {
                id,
                content_id: content.content_id,
                render_content: content.render_content,
            }),
        )
            .into_response(),
        Ok(GeneratedAdvertisement::Empty) => {
            (StatusCode::OK, Json(AdvertisementResponse::Empty)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> Response {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "starting" })
    };
    (status, Json(payload)).into_response()
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
