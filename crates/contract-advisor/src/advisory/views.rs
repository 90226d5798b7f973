use serde::Serialize;

use super::cohort::SkippedMember;
use super::domain::{ContractYears, DecisionContext, PlayerSnapshot, RiskProfile, WarBand};
use super::engine::{Recommendation, RuleAudit, RuleCell, RuleTable, Stance, TraceEntry};
use super::service::ContractAdvisory;

/// Presentation payload for one advisory. Formatting only; no decision logic lives here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryView {
    pub recommendation: String,
    pub recommendation_code: Recommendation,
    pub cohort_alternatives: Vec<CohortAlternativeView>,
    pub player: PlayerSnapshot,
    pub context: DecisionContext,
    pub context_label: &'static str,
    pub contract_years: ContractYears,
    pub band: WarBand,
    pub band_label: &'static str,
    pub risk: RiskProfile,
    pub risk_label: &'static str,
    pub stance: Stance,
    pub trace: Vec<TraceEntry>,
    pub rule_table_version: String,
    pub cohort_size: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedMember>,
}

impl AdvisoryView {
    pub fn from_advisory(advisory: &ContractAdvisory) -> Self {
        let outcome = advisory.outcome();
        let comparison = &advisory.comparison;

        Self {
            recommendation: outcome.text.clone(),
            recommendation_code: outcome.recommendation,
            cohort_alternatives: comparison
                .alternatives
                .iter()
                .map(|alternative| CohortAlternativeView {
                    name: alternative.player.name.clone(),
                    career_war: alternative.player.career_war,
                    p3: alternative.player.decline_3yr,
                    p5: alternative.player.decline_5yr,
                    recommendation: alternative.text.clone(),
                })
                .collect(),
            player: advisory.player.clone(),
            context: outcome.context,
            context_label: outcome.context.label(),
            contract_years: outcome.years,
            band: outcome.band,
            band_label: outcome.band.label(),
            risk: outcome.risk,
            risk_label: outcome.risk.label(),
            stance: outcome.recommendation.stance(),
            trace: outcome.trace.clone(),
            rule_table_version: outcome.table_version.clone(),
            cohort_size: comparison.cohort_size,
            skipped: comparison.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortAlternativeView {
    pub name: String,
    #[serde(rename = "careerWAR")]
    pub career_war: f64,
    pub p3: f64,
    pub p5: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntryView {
    pub player_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub career_war: f64,
    pub decline_3yr: f64,
    pub decline_5yr: f64,
    pub band: WarBand,
    pub band_label: &'static str,
}

impl From<&PlayerSnapshot> for RosterEntryView {
    fn from(player: &PlayerSnapshot) -> Self {
        let band = player.band();
        Self {
            player_id: player.id.0.clone(),
            name: player.name.clone(),
            position: player.position.clone(),
            career_war: player.career_war,
            decline_3yr: player.decline_3yr,
            decline_5yr: player.decline_5yr,
            band,
            band_label: band.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RulesView {
    pub version: String,
    pub clean: bool,
    pub audit: RuleAudit,
    pub cells: Vec<RuleCell>,
}

impl From<&RuleTable> for RulesView {
    fn from(table: &RuleTable) -> Self {
        let audit = table.audit();
        Self {
            version: table.version.clone(),
            clean: audit.is_clean(),
            audit,
            cells: table.cells.clone(),
        }
    }
}
