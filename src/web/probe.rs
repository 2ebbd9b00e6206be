// src/web/probe.rs
// =============================================================================
// Health and reachability endpoints.
//
// The probe runs on demand here: each request to /probe or /probe/advice
// sends fresh HEAD requests. A bad `url` parameter is a 400; an unreachable
// endpoint is a normal 200 report with `reachable: false`.
// =============================================================================

use super::{ApiError, AppState};
use crate::probe::{advise, ProbeReport, ProbeTarget, Verdict};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProbeParams {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub https_url: String,
    pub http_url: String,
    pub https: bool,
    pub http: bool,
    pub verdict: Verdict,
    pub messages: Vec<&'static str>,
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn probe_url(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
) -> Result<Json<ProbeReport>, ApiError> {
    // Reject bad input up front so it is a 400, not a report
    ProbeTarget::parse(&params.url)?;
    Ok(Json(state.prober.probe(&params.url).await))
}

pub async fn scheme_advice(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let advice = advise(&state.prober, &params.url).await?;

    Ok(Json(AdviceResponse {
        verdict: advice.verdict(),
        messages: advice.messages(),
        https_url: advice.https_url,
        http_url: advice.http_url,
        https: advice.https,
        http: advice.http,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::router;
    use super::super::test_support::{body_text, state_with};
    use crate::probe::test_support::{closed_port, start_mock_server};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt; // for `oneshot`

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(state_with(Vec::new())).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_probe_reachable_endpoint() {
        let addr = start_mock_server("204 No Content").await;
        let uri = format!("/probe?url=http://{}/ping", addr);

        let response = router(state_with(Vec::new())).oneshot(get(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["reachable"], true);
        assert_eq!(json["status_code"], 204);
    }

    #[tokio::test]
    async fn test_probe_unreachable_endpoint_is_still_200() {
        let addr = closed_port().await;
        let uri = format!("/probe?url=http://{}/", addr);

        let response = router(state_with(Vec::new())).oneshot(get(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["reachable"], false);
        assert!(json.get("failure").is_some());
    }

    #[tokio::test]
    async fn test_probe_bad_url_is_400() {
        let response = router(state_with(Vec::new()))
            .oneshot(get("/probe?url=ftp://example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().contains("ftp"));
    }

    #[tokio::test]
    async fn test_advice_endpoint() {
        let addr = start_mock_server("200 OK").await;
        let uri = format!("/probe/advice?url=http://{}/", addr);

        let response = router(state_with(Vec::new())).oneshot(get(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["http"], true);
        assert!(json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m == "Nice, it does load with http too"));
    }
}
