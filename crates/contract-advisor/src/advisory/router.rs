use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DecisionContext, PlayerId, PlayerSnapshot};
use super::repository::{RepositoryError, RosterRepository};
use super::service::{AdvisoryServiceError, ContractAdvisoryService};
use super::views::{RosterEntryView, RulesView};

/// Longest contract term accepted over HTTP.
pub const MAX_CONTRACT_YEARS: u32 = 10;

/// Router builder exposing roster listing, recommendation, and rule-table endpoints.
pub fn advisory_router<R>(service: Arc<ContractAdvisoryService<R>>) -> Router
where
    R: RosterRepository + 'static,
{
    Router::new()
        .route("/api/v1/players", get(roster_handler::<R>))
        .route(
            "/api/v1/contracts/recommendation",
            post(recommendation_handler::<R>),
        )
        .route("/api/v1/contracts/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/contracts/rules", get(rules_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterQuery {
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Player id or display name.
    pub player: String,
    pub context: String,
    pub contract_years: u32,
}

/// Caller-supplied player record; the id is derived from the name when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(alias = "careerWAR")]
    pub career_war: f64,
    #[serde(alias = "p3")]
    pub decline_3yr: f64,
    #[serde(alias = "p5")]
    pub decline_5yr: f64,
}

impl PlayerInput {
    pub fn into_snapshot(self) -> PlayerSnapshot {
        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => PlayerId(id.to_string()),
            _ => PlayerId::from_name(&self.name),
        };
        PlayerSnapshot {
            id,
            name: self.name,
            position: self.position,
            career_war: self.career_war,
            decline_3yr: self.decline_3yr,
            decline_5yr: self.decline_5yr,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    pub player: PlayerInput,
    #[serde(default)]
    pub population: Vec<PlayerInput>,
    pub context: String,
    pub contract_years: u32,
}

pub(crate) async fn roster_handler<R>(
    State(service): State<Arc<ContractAdvisoryService<R>>>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.roster(query.position.as_deref()) {
        Ok(players) => {
            let entries: Vec<RosterEntryView> = players.iter().map(RosterEntryView::from).collect();
            let payload = json!({
                "count": entries.len(),
                "players": entries,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn recommendation_handler<R>(
    State(service): State<Arc<ContractAdvisoryService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let (context, years) = match parse_terms(&request.context, request.contract_years) {
        Ok(terms) => terms,
        Err(response) => return response,
    };

    match service.advise(&request.player, context, years) {
        Ok(advisory) => (StatusCode::OK, axum::Json(advisory.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<ContractAdvisoryService<R>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let (context, years) = match parse_terms(&request.context, request.contract_years) {
        Ok(terms) => terms,
        Err(response) => return response,
    };

    let player = request.player.into_snapshot();
    let population: Vec<PlayerSnapshot> = request
        .population
        .into_iter()
        .map(PlayerInput::into_snapshot)
        .collect();

    match service.evaluate(&player, &population, context, years) {
        Ok(advisory) => (StatusCode::OK, axum::Json(advisory.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn rules_handler<R>(
    State(service): State<Arc<ContractAdvisoryService<R>>>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let view = RulesView::from(service.rule_table());
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn parse_terms(context: &str, years: u32) -> Result<(DecisionContext, u32), Response> {
    let context = context.parse::<DecisionContext>().map_err(unprocessable)?;

    if !(1..=MAX_CONTRACT_YEARS).contains(&years) {
        return Err(unprocessable(format!(
            "contract_years must be between 1 and {MAX_CONTRACT_YEARS} (got {years})"
        )));
    }

    Ok((context, years))
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn service_error_response(error: AdvisoryServiceError) -> Response {
    let status = match &error {
        AdvisoryServiceError::Recommendation(inner) if inner.is_invalid_input() => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AdvisoryServiceError::PlayerNotFound(_)
        | AdvisoryServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
