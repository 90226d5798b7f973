use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::advisory::domain::{DecisionContext, PlayerId, PlayerSnapshot, WarBand};
use crate::advisory::engine::{RecommendationEngine, RuleTable};
use crate::advisory::repository::{RepositoryError, RosterRepository};
use crate::advisory::{advisory_router, ContractAdvisoryService};

pub(super) fn jacob_smith() -> PlayerSnapshot {
    PlayerSnapshot::new("Jacob Smith", 4.2, 0.35, 0.61).with_position("SS")
}

pub(super) fn alex_adams() -> PlayerSnapshot {
    PlayerSnapshot::new("Alex Adams", 4.8, 0.20, 0.25).with_position("2B")
}

pub(super) fn max_johnson() -> PlayerSnapshot {
    PlayerSnapshot::new("Max Johnson", 1.1, 0.72, 0.80).with_position("CF")
}

pub(super) fn luis_ortega() -> PlayerSnapshot {
    PlayerSnapshot::new("Luis Ortega", 3.6, 0.58, 0.66)
        .with_id("lo-17")
        .with_position("SS")
}

pub(super) fn derek_hale() -> PlayerSnapshot {
    PlayerSnapshot::new("Derek Hale", 5.1, 0.30, 0.40).with_position("C")
}

pub(super) fn sam_whitaker() -> PlayerSnapshot {
    PlayerSnapshot::new("Sam Whitaker", 3.3, 0.20, 0.30).with_position("1B")
}

/// Six players in a fixed order; Jacob Smith's cohort is every player but Max Johnson.
pub(super) fn sample_roster() -> Vec<PlayerSnapshot> {
    vec![
        jacob_smith(),
        alex_adams(),
        max_johnson(),
        luis_ortega(),
        derek_hale(),
        sam_whitaker(),
    ]
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::standard()
}

/// Standard table with one (context, band) cell removed.
pub(super) fn table_without(context: DecisionContext, band: WarBand) -> RuleTable {
    let mut table = RuleTable::standard();
    table
        .cells
        .retain(|cell| !(cell.context == context && cell.band == band));
    table
}

pub(super) struct MemoryRoster {
    players: Vec<PlayerSnapshot>,
}

impl MemoryRoster {
    pub(super) fn new(players: Vec<PlayerSnapshot>) -> Self {
        Self { players }
    }
}

impl RosterRepository for MemoryRoster {
    fn fetch(&self, id: &PlayerId) -> Result<Option<PlayerSnapshot>, RepositoryError> {
        Ok(self.players.iter().find(|player| &player.id == id).cloned())
    }

    fn population(&self) -> Result<Vec<PlayerSnapshot>, RepositoryError> {
        Ok(self.players.clone())
    }
}

pub(super) struct UnavailableRoster;

impl RosterRepository for UnavailableRoster {
    fn fetch(&self, _id: &PlayerId) -> Result<Option<PlayerSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("scoring export offline".into()))
    }

    fn population(&self) -> Result<Vec<PlayerSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("scoring export offline".into()))
    }
}

pub(super) fn build_service() -> Arc<ContractAdvisoryService<MemoryRoster>> {
    Arc::new(ContractAdvisoryService::new(Arc::new(MemoryRoster::new(
        sample_roster(),
    ))))
}

pub(super) fn advisory_router_with_service(
    service: Arc<ContractAdvisoryService<MemoryRoster>>,
) -> axum::Router {
    advisory_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
