use super::common::*;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::advisory::router::{
    evaluate_handler, recommendation_handler, roster_handler, EvaluationRequest,
    RecommendationRequest, RosterQuery,
};
use crate::advisory::ContractAdvisoryService;

fn recommendation_request(player: &str, context: &str, years: u32) -> RecommendationRequest {
    RecommendationRequest {
        player: player.to_string(),
        context: context.to_string(),
        contract_years: years,
    }
}

#[tokio::test]
async fn recommendation_handler_returns_advisory_view() {
    let response = recommendation_handler::<MemoryRoster>(
        State(build_service()),
        axum::Json(recommendation_request("Jacob Smith", "free-agent", 3)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommendation"], "Sign FA Jacob Smith for 3 years approved");
    assert_eq!(body["context"], "free_agent");
    assert_eq!(body["cohortAlternatives"][0]["recommendation"], "Pass on signing");
}

#[tokio::test]
async fn recommendation_handler_returns_not_found_for_unknown_player() {
    let response = recommendation_handler::<MemoryRoster>(
        State(build_service()),
        axum::Json(recommendation_request("Nobody Special", "owned", 2)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Nobody Special"));
}

#[tokio::test]
async fn recommendation_handler_rejects_out_of_range_years() {
    for years in [0, 11] {
        let response = recommendation_handler::<MemoryRoster>(
            State(build_service()),
            axum::Json(recommendation_request("Jacob Smith", "trade", years)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn recommendation_handler_rejects_unknown_context() {
    let response = recommendation_handler::<MemoryRoster>(
        State(build_service()),
        axum::Json(recommendation_request("Jacob Smith", "rental", 2)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("error").contains("rental"));
}

#[tokio::test]
async fn recommendation_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(ContractAdvisoryService::new(Arc::new(UnavailableRoster)));
    let response = recommendation_handler::<UnavailableRoster>(
        State(service),
        axum::Json(recommendation_request("Jacob Smith", "owned", 2)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn evaluate_handler_rejects_invalid_probabilities() {
    let request: EvaluationRequest = serde_json::from_value(json!({
        "player": { "name": "Jacob Smith", "careerWAR": 4.2, "p3": 1.4, "p5": 0.3 },
        "population": [],
        "context": "free_agent",
        "contract_years": 2,
    }))
    .expect("request parses");

    let response =
        evaluate_handler::<MemoryRoster>(State(build_service()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn roster_handler_filters_by_position() {
    let response = roster_handler::<MemoryRoster>(
        State(build_service()),
        Query(RosterQuery {
            position: Some("ss".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["players"][0]["name"], "Jacob Smith");
    assert_eq!(body["players"][0]["band"], "all_star");
}

#[tokio::test]
async fn recommendation_route_accepts_payloads() {
    let router = advisory_router_with_service(build_service());

    let payload = json!({
        "player": "Max Johnson",
        "context": "trade",
        "contract_years": 4,
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/contracts/recommendation")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommendationCode"], "potential_risk");
    assert_eq!(body["cohortSize"], 0);
    assert_eq!(body["cohortAlternatives"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn evaluate_route_compares_supplied_population() {
    let router = advisory_router_with_service(build_service());

    let payload = json!({
        "player": { "id": "walk-in", "name": "Walk-In Prospect", "career_war": 2.4, "decline_3yr": 0.2, "decline_5yr": 0.7 },
        "population": [
            { "name": "Bench Bat", "careerWAR": 2.1, "p3": 0.2, "p5": 0.1 },
            { "name": "Walk-In Prospect", "id": "walk-in", "careerWAR": 2.4, "p3": 0.9, "p5": 0.9 }
        ],
        "context": "free agent",
        "contract_years": 2,
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/contracts/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["cohortSize"], 1);
    assert_eq!(body["cohortAlternatives"][0]["name"], "Bench Bat");
}

#[tokio::test]
async fn rules_route_reports_a_clean_table() {
    let router = advisory_router_with_service(build_service());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/contracts/rules")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["clean"], true);
    assert_eq!(body["cells"].as_array().map(Vec::len), Some(18));
}

#[tokio::test]
async fn players_route_lists_the_roster() {
    let router = advisory_router_with_service(build_service());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/players?position=CF")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["players"][0]["player_id"], "max-johnson");
}
