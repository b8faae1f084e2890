use axum::{
    Json, Router,
    extract::Path,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{BUILTIN_SCENARIOS, ScenarioId, sample_payload};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioListResponse {
    scenarios: Vec<&'static str>,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("results API listening on http://{addr}");
    tracing::info!("local access: http://127.0.0.1:{port}/");
    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/scenarios", get(scenarios_handler))
        .route("/api/results/:id", get(results_handler))
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn scenarios_handler() -> Response {
    json_response(
        StatusCode::OK,
        ScenarioListResponse {
            scenarios: BUILTIN_SCENARIOS.to_vec(),
        },
    )
}

async fn results_handler(Path(id): Path<String>) -> Response {
    let id = ScenarioId::new(id);
    match sample_payload(&id) {
        Some(payload) => json_response(StatusCode::OK, payload),
        None => error_response(StatusCode::NOT_FOUND, &format!("unknown scenario: {id}")),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn results_handler_serves_builtin_scenario() {
        let response = results_handler(Path("baseline".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[tokio::test]
    async fn results_handler_rejects_unknown_scenario() {
        let response = results_handler(Path("retire-at-12".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn scenario_list_serialization_contains_builtin_ids() {
        let json = serde_json::to_string(&ScenarioListResponse {
            scenarios: BUILTIN_SCENARIOS.to_vec(),
        })
        .expect("list should serialize");
        assert!(json.contains("\"scenarios\""));
        assert!(json.contains("\"baseline\""));
        assert!(json.contains("\"optimistic\""));
        assert!(json.contains("\"defensive\""));
    }

    #[test]
    fn results_serialization_matches_dashboard_keys() {
        let payload = sample_payload(&ScenarioId::new("baseline")).expect("builtin scenario");
        let json = serde_json::to_string(&payload).expect("payload should serialize");
        assert!(json.contains("\"projectionYears\""));
        assert!(json.contains("\"projectionP10\""));
        assert!(json.contains("\"projectionP50\""));
        assert!(json.contains("\"projectionP90\""));
        assert!(json.contains("\"portfolioRows\""));
        assert!(json.contains("\"cashflowRows\""));
    }
}
