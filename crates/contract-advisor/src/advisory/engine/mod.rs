mod catalog;
mod rules;
mod table;

pub use catalog::{Recommendation, Stance};
pub use table::{
    ContractRule, DeclineThresholds, MisplacedRule, RuleAudit, RuleCell, RuleGap, RuleOverlap,
    RuleTable, YearSpan, RULE_TABLE_VERSION,
};

use super::domain::{
    ContractYears, DecisionContext, DeclineHorizon, PlayerId, PlayerSnapshot, RiskProfile,
    WarBand,
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Stateless evaluator that applies a rule table to a player snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    table: RuleTable,
}

impl RecommendationEngine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn standard() -> Self {
        Self::new(RuleTable::standard())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Evaluate one player for a decision context and contract length.
    pub fn evaluate(
        &self,
        player: &PlayerSnapshot,
        context: DecisionContext,
        years: u32,
    ) -> Result<RecommendationOutcome, RecommendationError> {
        let inputs = rules::validate(player, years)?;
        let resolution = rules::resolve(&self.table, context, &inputs)?;

        debug!(
            player = %player.id,
            ?context,
            band = ?resolution.band,
            risk = ?resolution.risk,
            years,
            recommendation = ?resolution.recommendation,
            "contract recommendation resolved"
        );

        Ok(RecommendationOutcome {
            player_id: player.id.clone(),
            context,
            years: inputs.years,
            band: resolution.band,
            risk: resolution.risk,
            thresholds: resolution.thresholds,
            recommendation: resolution.recommendation,
            text: resolution.recommendation.render(&player.name, inputs.years),
            trace: resolution.trace,
            table_version: self.table.version.clone(),
        })
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Evaluate raw scalar inputs against the standard table.
pub fn recommend(
    context: DecisionContext,
    career_war: f64,
    decline_3yr: f64,
    decline_5yr: f64,
    years: u32,
) -> Result<Recommendation, RecommendationError> {
    static STANDARD: OnceLock<RuleTable> = OnceLock::new();

    let player = PlayerSnapshot::new("player", career_war, decline_3yr, decline_5yr);
    let inputs = rules::validate(&player, years)?;
    let table = STANDARD.get_or_init(RuleTable::standard);
    let resolution = rules::resolve(table, context, &inputs)?;
    Ok(resolution.recommendation)
}

/// Which input or step a trace entry explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFactor {
    CareerWar,
    ThreeYearDecline,
    FiveYearDecline,
    ContractTerm,
    Rule,
}

/// One step of the reason trace attached to every outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub factor: TraceFactor,
    pub notes: String,
}

/// Evaluation output with the decision trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub player_id: PlayerId,
    pub context: DecisionContext,
    pub years: ContractYears,
    pub band: WarBand,
    pub risk: RiskProfile,
    pub thresholds: DeclineThresholds,
    pub recommendation: Recommendation,
    pub text: String,
    pub trace: Vec<TraceEntry>,
    pub table_version: String,
}

/// Input and table failures raised by the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendationError {
    #[error("{horizon} decline probability {value} is outside [0, 1]")]
    InvalidProbability { horizon: DeclineHorizon, value: f64 },
    #[error("contract years must be at least 1 (got {years})")]
    InvalidYears { years: u32 },
    #[error("career WAR must be a number (got {value})")]
    InvalidCareerWar { value: f64 },
    #[error("no rule resolves {context:?} / {band:?} (risk {risk:?}, {years} years)")]
    Unresolved {
        context: DecisionContext,
        band: WarBand,
        risk: Option<RiskProfile>,
        years: u32,
    },
}

impl RecommendationError {
    /// Input errors are the caller's to fix; `Unresolved` is a defect in the table.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, RecommendationError::Unresolved { .. })
    }
}
