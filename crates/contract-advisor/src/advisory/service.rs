use std::cmp::Ordering;
use std::sync::Arc;

use tracing::info;

use super::cohort::{CohortComparator, CohortComparison};
use super::domain::{DecisionContext, PlayerId, PlayerSnapshot};
use super::engine::{
    RecommendationEngine, RecommendationError, RecommendationOutcome, RuleTable,
};
use super::repository::{RepositoryError, RosterRepository};
use super::views::AdvisoryView;
use crate::roster::normalize_name;

/// Service composing the roster repository, the recommendation engine, and the cohort
/// comparator.
pub struct ContractAdvisoryService<R> {
    roster: Arc<R>,
    engine: Arc<RecommendationEngine>,
    comparator: CohortComparator,
}

impl<R> ContractAdvisoryService<R>
where
    R: RosterRepository + 'static,
{
    pub fn new(roster: Arc<R>) -> Self {
        Self::with_engine(roster, RecommendationEngine::standard())
    }

    pub fn with_engine(roster: Arc<R>, engine: RecommendationEngine) -> Self {
        Self {
            roster,
            engine: Arc::new(engine),
            comparator: CohortComparator::default(),
        }
    }

    pub fn rule_table(&self) -> &RuleTable {
        self.engine.table()
    }

    /// Look a player up by id, then by the id derived from a name, then by normalized name.
    pub fn resolve_player(&self, query: &str) -> Result<PlayerSnapshot, AdvisoryServiceError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AdvisoryServiceError::PlayerNotFound(query.to_string()));
        }

        if let Some(player) = self.roster.fetch(&PlayerId(trimmed.to_string()))? {
            return Ok(player);
        }
        if let Some(player) = self.roster.fetch(&PlayerId::from_name(trimmed))? {
            return Ok(player);
        }

        let wanted = normalize_name(trimmed);
        self.roster
            .population()?
            .into_iter()
            .find(|player| normalize_name(&player.name) == wanted)
            .ok_or_else(|| AdvisoryServiceError::PlayerNotFound(trimmed.to_string()))
    }

    /// Recommend for a rostered player and compare against the roster cohort.
    pub fn advise(
        &self,
        query: &str,
        context: DecisionContext,
        years: u32,
    ) -> Result<ContractAdvisory, AdvisoryServiceError> {
        let player = self.resolve_player(query)?;
        let population = self.roster.population()?;
        let advisory = self.evaluate(&player, &population, context, years)?;

        info!(
            player = %player.id,
            ?context,
            years,
            recommendation = ?advisory.comparison.focal_recommendation,
            alternatives = advisory.comparison.alternatives.len(),
            "contract advisory produced"
        );

        Ok(advisory)
    }

    /// Recommend for caller-supplied snapshots without touching the repository.
    pub fn evaluate(
        &self,
        player: &PlayerSnapshot,
        population: &[PlayerSnapshot],
        context: DecisionContext,
        years: u32,
    ) -> Result<ContractAdvisory, AdvisoryServiceError> {
        let comparison = self
            .comparator
            .compare(&self.engine, player, population, context, years)?;

        Ok(ContractAdvisory {
            player: player.clone(),
            comparison,
        })
    }

    /// Roster listing ordered by career WAR, optionally limited to one position.
    pub fn roster(&self, position: Option<&str>) -> Result<Vec<PlayerSnapshot>, AdvisoryServiceError> {
        let wanted = position
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_ascii_uppercase);

        let mut players: Vec<PlayerSnapshot> = self
            .roster
            .population()?
            .into_iter()
            .filter(|player| match (&wanted, &player.position) {
                (None, _) => true,
                (Some(wanted), Some(position)) => position.trim().eq_ignore_ascii_case(wanted),
                (Some(_), None) => false,
            })
            .collect();

        players.sort_by(|a, b| {
            b.career_war
                .partial_cmp(&a.career_war)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(players)
    }
}

/// Focal recommendation and cohort comparison for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractAdvisory {
    pub player: PlayerSnapshot,
    pub comparison: CohortComparison,
}

impl ContractAdvisory {
    pub fn outcome(&self) -> &RecommendationOutcome {
        &self.comparison.focal
    }

    pub fn view(&self) -> AdvisoryView {
        AdvisoryView::from_advisory(self)
    }
}

/// Error raised by the advisory service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryServiceError {
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no player matches '{0}'")]
    PlayerNotFound(String),
}
