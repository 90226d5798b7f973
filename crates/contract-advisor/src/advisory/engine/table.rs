use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{DecisionContext, RiskProfile, WarBand};
use super::catalog::Recommendation;

/// Version stamped on every outcome produced from [`RuleTable::standard`].
pub const RULE_TABLE_VERSION: &str = "2024.3";

const STABLE: &[RiskProfile] = &[RiskProfile::Stable];
const LATE: &[RiskProfile] = &[RiskProfile::LateDecline];
const EARLY: &[RiskProfile] = &[RiskProfile::EarlyDecline];
const SUSTAINED: &[RiskProfile] = &[RiskProfile::SustainedDecline];
const NOT_EARLY: &[RiskProfile] = &[RiskProfile::Stable, RiskProfile::LateDecline];
const EARLY_ANY: &[RiskProfile] = &[RiskProfile::EarlyDecline, RiskProfile::SustainedDecline];

/// Probability cutoffs at or above which a horizon counts as elevated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeclineThresholds {
    pub three_year: f64,
    pub five_year: f64,
}

impl DeclineThresholds {
    pub const fn new(three_year: f64, five_year: f64) -> Self {
        Self {
            three_year,
            five_year,
        }
    }

    pub fn profile(&self, decline_3yr: f64, decline_5yr: f64) -> RiskProfile {
        RiskProfile::from_flags(
            decline_3yr >= self.three_year,
            decline_5yr >= self.five_year,
        )
    }
}

/// Inclusive range of contract years; `max: None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub min: u32,
    pub max: Option<u32>,
}

impl YearSpan {
    pub const fn any() -> Self {
        Self { min: 1, max: None }
    }

    pub const fn at_most(max: u32) -> Self {
        Self {
            min: 1,
            max: Some(max),
        }
    }

    pub const fn between(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, years: u32) -> bool {
        years >= self.min && self.max.map_or(true, |max| years <= max)
    }

    pub fn describe(&self) -> String {
        match self.max {
            None if self.min <= 1 => "any term".to_string(),
            None => format!("{}+ years", self.min),
            Some(max) if max == self.min => format!("{max} year(s)"),
            Some(max) if self.min <= 1 => format!("up to {max} year(s)"),
            Some(max) => format!("{}-{} years", self.min, max),
        }
    }
}

/// One row of a cell: risk profiles and a year span that select a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRule {
    pub risks: Vec<RiskProfile>,
    pub years: YearSpan,
    pub recommendation: Recommendation,
}

impl ContractRule {
    pub fn matches(&self, risk: RiskProfile, years: u32) -> bool {
        self.risks.contains(&risk) && self.years.contains(years)
    }
}

/// Thresholds and ordered rules for one (decision context, WAR band) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCell {
    pub context: DecisionContext,
    pub band: WarBand,
    pub thresholds: DeclineThresholds,
    pub rules: Vec<ContractRule>,
}

impl RuleCell {
    /// First rule matching the risk profile and years, with its index.
    pub fn resolve(&self, risk: RiskProfile, years: u32) -> Option<(usize, &ContractRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(risk, years))
    }

    /// Years at which the set of matching rules can change. Checking each of them covers every
    /// interval of the positive integers.
    fn sample_years(&self) -> BTreeSet<u32> {
        let mut samples = BTreeSet::from([1]);
        for rule in &self.rules {
            samples.insert(rule.years.min.max(1));
            if let Some(max) = rule.years.max {
                samples.insert(max.saturating_add(1));
            }
        }
        samples
    }
}

/// A (context, band, risk, years) combination that no rule resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleGap {
    pub context: DecisionContext,
    pub band: WarBand,
    pub risk: Option<RiskProfile>,
    pub years: Option<u32>,
}

/// A combination that more than one rule matches; only the first is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOverlap {
    pub context: DecisionContext,
    pub band: WarBand,
    pub risk: RiskProfile,
    pub years: u32,
    pub rule_indexes: Vec<usize>,
}

/// A rule whose recommendation belongs to another decision context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisplacedRule {
    pub context: DecisionContext,
    pub band: WarBand,
    pub rule_index: usize,
    pub recommendation: Recommendation,
}

/// Result of [`RuleTable::audit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleAudit {
    pub gaps: Vec<RuleGap>,
    pub overlaps: Vec<RuleOverlap>,
    pub misplaced: Vec<MisplacedRule>,
}

impl RuleAudit {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.overlaps.is_empty() && self.misplaced.is_empty()
    }
}

/// Versioned decision table keyed by decision context and WAR band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: String,
    pub cells: Vec<RuleCell>,
}

impl RuleTable {
    pub fn cell(&self, context: DecisionContext, band: WarBand) -> Option<&RuleCell> {
        self.cells
            .iter()
            .find(|cell| cell.context == context && cell.band == band)
    }

    /// Check every context, band, and risk profile at every year breakpoint.
    pub fn audit(&self) -> RuleAudit {
        let mut audit = RuleAudit::default();

        for context in DecisionContext::ALL {
            for band in WarBand::ALL {
                let Some(cell) = self.cell(context, band) else {
                    audit.gaps.push(RuleGap {
                        context,
                        band,
                        risk: None,
                        years: None,
                    });
                    continue;
                };

                for (rule_index, rule) in cell.rules.iter().enumerate() {
                    if rule.recommendation.context() != context {
                        audit.misplaced.push(MisplacedRule {
                            context,
                            band,
                            rule_index,
                            recommendation: rule.recommendation,
                        });
                    }
                }

                let samples = cell.sample_years();
                for risk in RiskProfile::ALL {
                    for &years in &samples {
                        let rule_indexes: Vec<usize> = cell
                            .rules
                            .iter()
                            .enumerate()
                            .filter(|(_, rule)| rule.matches(risk, years))
                            .map(|(index, _)| index)
                            .collect();

                        match rule_indexes.len() {
                            0 => audit.gaps.push(RuleGap {
                                context,
                                band,
                                risk: Some(risk),
                                years: Some(years),
                            }),
                            1 => {}
                            _ => audit.overlaps.push(RuleOverlap {
                                context,
                                band,
                                risk,
                                years,
                                rule_indexes,
                            }),
                        }
                    }
                }
            }
        }

        audit
    }

    /// The reconciled contract table used by the dashboard.
    #[rustfmt::skip]
    pub fn standard() -> Self {
        use DecisionContext::{FreeAgent, OwnedByTeam, TradeCandidate};
        use Recommendation::*;
        use WarBand::{AllStar, Elite, Fringe, Regular, Replacement, Starter};

        let cells = vec![
            // Currently own: years of control remaining.
            cell(OwnedByTeam, Elite, 0.60, 0.55, vec![
                rule(STABLE, YearSpan::at_most(3), ExtendLongTerm),
                rule(STABLE, YearSpan::at_least(4), RetainAndMonitor),
                rule(LATE, YearSpan::at_most(1), ExtendShortTerm),
                rule(LATE, YearSpan::between(2, 3), RetainDoNotExtend),
                rule(LATE, YearSpan::at_least(4), TradeWhileValueHigh),
                rule(EARLY_ANY, YearSpan::at_most(1), RetainDoNotExtend),
                rule(EARLY_ANY, YearSpan::at_least(2), TradeWhileValueHigh),
            ]),
            cell(OwnedByTeam, AllStar, 0.55, 0.50, vec![
                rule(STABLE, YearSpan::at_most(1), Extend),
                rule(STABLE, YearSpan::between(2, 3), ExtendWithClubOptions),
                rule(STABLE, YearSpan::at_least(4), RetainAndMonitor),
                rule(LATE, YearSpan::at_most(1), ExtendShortTerm),
                rule(LATE, YearSpan::between(2, 5), RetainDoNotExtend),
                rule(LATE, YearSpan::at_least(6), TradeWhileValueHigh),
                rule(EARLY_ANY, YearSpan::at_most(1), RetainDoNotExtend),
                rule(EARLY_ANY, YearSpan::at_least(2), TradeWhileValueHigh),
            ]),
            cell(OwnedByTeam, Starter, 0.50, 0.50, vec![
                rule(STABLE, YearSpan::at_most(1), Extend),
                rule(STABLE, YearSpan::between(2, 3), ExtendWithClubOptions),
                rule(STABLE, YearSpan::at_least(4), RetainAndMonitor),
                rule(LATE, YearSpan::at_most(3), RetainDoNotExtend),
                rule(LATE, YearSpan::at_least(4), ShopAtDeadline),
                rule(EARLY, YearSpan::at_most(1), RetainDoNotExtend),
                rule(EARLY, YearSpan::at_least(2), ShopAtDeadline),
                rule(SUSTAINED, YearSpan::any(), TradeAway),
            ]),
            cell(OwnedByTeam, Regular, 0.50, 0.50, vec![
                rule(STABLE, YearSpan::at_most(1), ExtendShortTerm),
                rule(STABLE, YearSpan::at_least(2), RetainAndMonitor),
                rule(LATE, YearSpan::at_most(3), RetainDoNotExtend),
                rule(LATE, YearSpan::at_least(4), ShopAtDeadline),
                rule(EARLY, YearSpan::at_most(3), ShopAtDeadline),
                rule(EARLY, YearSpan::at_least(4), TradeAway),
                rule(SUSTAINED, YearSpan::any(), TradeAway),
            ]),
            cell(OwnedByTeam, Fringe, 0.45, 0.45, vec![
                rule(STABLE, YearSpan::at_most(3), RetainAndMonitor),
                rule(STABLE, YearSpan::at_least(4), ShopAtDeadline),
                rule(LATE, YearSpan::any(), RetainDoNotExtend),
                rule(EARLY_ANY, YearSpan::any(), TradeAway),
            ]),
            cell(OwnedByTeam, Replacement, 0.40, 0.40, vec![
                rule(NOT_EARLY, YearSpan::at_most(1), RetainDoNotExtend),
                rule(NOT_EARLY, YearSpan::at_least(2), TradeAway),
                rule(EARLY_ANY, YearSpan::any(), Release),
            ]),
            // Free agent: proposed contract length.
            cell(FreeAgent, Elite, 0.65, 0.60, vec![
                rule(STABLE, YearSpan::any(), SignApproved),
                rule(LATE, YearSpan::at_most(3), SignApproved),
                rule(LATE, YearSpan::at_least(4), SignWithClubOptions),
                rule(EARLY, YearSpan::any(), HigherAavShortTerm),
                rule(SUSTAINED, YearSpan::at_most(1), HigherAavShortTerm),
                rule(SUSTAINED, YearSpan::at_least(2), OneYearOrTeamOptions),
            ]),
            cell(FreeAgent, AllStar, 0.60, 0.55, vec![
                rule(STABLE, YearSpan::at_most(5), SignApproved),
                rule(STABLE, YearSpan::at_least(6), SignWithClubOptions),
                rule(LATE, YearSpan::at_most(3), SignApproved),
                rule(LATE, YearSpan::at_least(4), TwoToThreeYearDeal),
                rule(EARLY, YearSpan::at_most(1), HigherAavShortTerm),
                rule(EARLY, YearSpan::at_least(2), OneYearOrTeamOptions),
                rule(SUSTAINED, YearSpan::any(), OneYearOrTeamOptions),
            ]),
            cell(FreeAgent, Starter, 0.55, 0.50, vec![
                rule(STABLE, YearSpan::at_most(3), SignApproved),
                rule(STABLE, YearSpan::at_least(4), SignWithClubOptions),
                rule(LATE, YearSpan::at_most(1), SignApproved),
                rule(LATE, YearSpan::at_least(2), TwoToThreeYearDeal),
                rule(EARLY, YearSpan::any(), OneYearOrTeamOptions),
                rule(SUSTAINED, YearSpan::at_most(1), OneYearOrTeamOptions),
                rule(SUSTAINED, YearSpan::at_least(2), PassOnSigning),
            ]),
            cell(FreeAgent, Regular, 0.50, 0.50, vec![
                rule(STABLE, YearSpan::at_most(3), SignApproved),
                rule(STABLE, YearSpan::at_least(4), TwoToThreeYearDeal),
                rule(LATE, YearSpan::at_most(1), SignApproved),
                rule(LATE, YearSpan::at_least(2), OneYearOrTeamOptions),
                rule(EARLY, YearSpan::any(), OneYearOrTeamOptions),
                rule(SUSTAINED, YearSpan::any(), PassOnSigning),
            ]),
            cell(FreeAgent, Fringe, 0.45, 0.45, vec![
                rule(STABLE, YearSpan::at_most(1), SignApproved),
                rule(STABLE, YearSpan::at_least(2), OneYearOrTeamOptions),
                rule(LATE, YearSpan::any(), OneYearOrTeamOptions),
                rule(EARLY_ANY, YearSpan::at_most(1), MinorLeagueDeal),
                rule(EARLY_ANY, YearSpan::at_least(2), PassOnSigning),
            ]),
            cell(FreeAgent, Replacement, 0.40, 0.40, vec![
                rule(NOT_EARLY, YearSpan::any(), MinorLeagueDeal),
                rule(EARLY_ANY, YearSpan::any(), PassOnSigning),
            ]),
            // Trade candidate: years of control acquired.
            cell(TradeCandidate, Elite, 0.70, 0.70, vec![
                rule(STABLE, YearSpan::any(), TradeForAndExtend),
                rule(LATE, YearSpan::at_most(3), TradeForDoNotExtend),
                rule(LATE, YearSpan::at_least(4), PotentialRisk),
                rule(EARLY_ANY, YearSpan::at_most(1), TradeForRental),
                rule(EARLY_ANY, YearSpan::between(2, 3), PotentialRisk),
                rule(EARLY_ANY, YearSpan::at_least(4), DoNotTrade),
            ]),
            cell(TradeCandidate, AllStar, 0.72, 0.72, vec![
                rule(STABLE, YearSpan::any(), TradeForAndExtend),
                rule(LATE, YearSpan::at_most(3), TradeForDoNotExtend),
                rule(LATE, YearSpan::at_least(4), PotentialRisk),
                rule(EARLY, YearSpan::at_most(1), TradeForRental),
                rule(EARLY, YearSpan::between(2, 3), PotentialRisk),
                rule(EARLY, YearSpan::at_least(4), DoNotTrade),
                rule(SUSTAINED, YearSpan::at_most(1), TradeForRental),
                rule(SUSTAINED, YearSpan::at_least(2), DoNotTrade),
            ]),
            cell(TradeCandidate, Starter, 0.75, 0.75, vec![
                rule(STABLE, YearSpan::at_most(3), TradeForAndExtend),
                rule(STABLE, YearSpan::at_least(4), TradeForDoNotExtend),
                rule(LATE, YearSpan::at_most(3), TradeForDoNotExtend),
                rule(LATE, YearSpan::at_least(4), PotentialRisk),
                rule(EARLY, YearSpan::at_most(1), TradeForRental),
                rule(EARLY, YearSpan::between(2, 3), PotentialRisk),
                rule(EARLY, YearSpan::at_least(4), DoNotTrade),
                rule(SUSTAINED, YearSpan::at_most(1), PotentialRisk),
                rule(SUSTAINED, YearSpan::at_least(2), DoNotTrade),
            ]),
            cell(TradeCandidate, Regular, 0.75, 0.75, vec![
                rule(STABLE, YearSpan::at_most(3), TradeForDoNotExtend),
                rule(STABLE, YearSpan::at_least(4), LowCostDepthOnly),
                rule(LATE, YearSpan::at_most(1), TradeForRental),
                rule(LATE, YearSpan::at_least(2), LowCostDepthOnly),
                rule(EARLY, YearSpan::at_most(1), PotentialRisk),
                rule(EARLY, YearSpan::at_least(2), DoNotTrade),
                rule(SUSTAINED, YearSpan::any(), DoNotTrade),
            ]),
            cell(TradeCandidate, Fringe, 0.80, 0.80, vec![
                rule(STABLE, YearSpan::at_most(3), LowCostDepthOnly),
                rule(STABLE, YearSpan::at_least(4), PotentialRisk),
                rule(LATE, YearSpan::at_most(1), LowCostDepthOnly),
                rule(LATE, YearSpan::at_least(2), PotentialRisk),
                rule(EARLY_ANY, YearSpan::at_most(3), PotentialRisk),
                rule(EARLY_ANY, YearSpan::at_least(4), DoNotTrade),
            ]),
            cell(TradeCandidate, Replacement, 0.80, 0.80, vec![
                rule(NOT_EARLY, YearSpan::at_most(1), LowCostDepthOnly),
                rule(NOT_EARLY, YearSpan::between(2, 3), PotentialRisk),
                rule(NOT_EARLY, YearSpan::at_least(4), DoNotTrade),
                rule(EARLY_ANY, YearSpan::at_most(1), PotentialRisk),
                rule(EARLY_ANY, YearSpan::at_least(2), DoNotTrade),
            ]),
        ];

        Self {
            version: RULE_TABLE_VERSION.to_string(),
            cells,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn cell(
    context: DecisionContext,
    band: WarBand,
    three_year: f64,
    five_year: f64,
    rules: Vec<ContractRule>,
) -> RuleCell {
    RuleCell {
        context,
        band,
        thresholds: DeclineThresholds::new(three_year, five_year),
        rules,
    }
}

fn rule(risks: &[RiskProfile], years: YearSpan, recommendation: Recommendation) -> ContractRule {
    ContractRule {
        risks: risks.to_vec(),
        years,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_audits_clean() {
        let audit = RuleTable::standard().audit();
        assert!(audit.gaps.is_empty(), "gaps: {:?}", audit.gaps);
        assert!(audit.overlaps.is_empty(), "overlaps: {:?}", audit.overlaps);
        assert!(audit.misplaced.is_empty(), "misplaced: {:?}", audit.misplaced);
        assert!(audit.is_clean());
    }

    #[test]
    fn standard_table_has_one_cell_per_context_and_band() {
        let table = RuleTable::standard();
        assert_eq!(table.cells.len(), DecisionContext::ALL.len() * WarBand::ALL.len());
        assert_eq!(table.version, RULE_TABLE_VERSION);
        for context in DecisionContext::ALL {
            for band in WarBand::ALL {
                assert!(table.cell(context, band).is_some(), "{context:?}/{band:?}");
            }
        }
    }

    #[test]
    fn trade_thresholds_tighten_toward_the_floor() {
        let table = RuleTable::standard();
        let top = table
            .cell(DecisionContext::TradeCandidate, WarBand::Elite)
            .expect("cell");
        let bottom = table
            .cell(DecisionContext::TradeCandidate, WarBand::Replacement)
            .expect("cell");
        assert_eq!(top.thresholds, DeclineThresholds::new(0.70, 0.70));
        assert_eq!(bottom.thresholds, DeclineThresholds::new(0.80, 0.80));
    }

    #[test]
    fn audit_reports_missing_cells_and_uncovered_years() {
        let mut table = RuleTable::standard();
        table.cells.retain(|cell| {
            !(cell.context == DecisionContext::FreeAgent && cell.band == WarBand::Fringe)
        });
        let elite_owned = table
            .cells
            .iter_mut()
            .find(|cell| {
                cell.context == DecisionContext::OwnedByTeam && cell.band == WarBand::Elite
            })
            .expect("cell");
        elite_owned
            .rules
            .retain(|rule| rule.recommendation != Recommendation::RetainAndMonitor);

        let audit = table.audit();
        assert!(audit.gaps.iter().any(|gap| {
            gap.context == DecisionContext::FreeAgent
                && gap.band == WarBand::Fringe
                && gap.risk.is_none()
        }));
        assert!(audit.gaps.contains(&RuleGap {
            context: DecisionContext::OwnedByTeam,
            band: WarBand::Elite,
            risk: Some(RiskProfile::Stable),
            years: Some(4),
        }));
        assert!(!audit.is_clean());
    }

    #[test]
    fn audit_flags_overlapping_and_misplaced_rules() {
        let mut table = RuleTable::standard();
        let cell = table
            .cells
            .iter_mut()
            .find(|cell| {
                cell.context == DecisionContext::TradeCandidate && cell.band == WarBand::Regular
            })
            .expect("cell");
        cell.rules
            .push(rule(&RiskProfile::ALL, YearSpan::any(), Recommendation::Extend));

        let audit = table.audit();
        assert!(!audit.overlaps.is_empty());
        assert_eq!(audit.misplaced.len(), 1);
        assert_eq!(audit.misplaced[0].recommendation, Recommendation::Extend);
    }

    #[test]
    fn year_span_descriptions_read_naturally() {
        assert_eq!(YearSpan::any().describe(), "any term");
        assert_eq!(YearSpan::at_most(3).describe(), "up to 3 year(s)");
        assert_eq!(YearSpan::between(2, 3).describe(), "2-3 years");
        assert_eq!(YearSpan::at_least(6).describe(), "6+ years");
        assert!(YearSpan::between(2, 3).contains(3));
        assert!(!YearSpan::between(2, 3).contains(4));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let thresholds = DeclineThresholds::new(0.7, 0.7);
        assert_eq!(thresholds.profile(0.7, 0.69), RiskProfile::EarlyDecline);
        assert_eq!(thresholds.profile(0.69, 0.7), RiskProfile::LateDecline);
        assert_eq!(thresholds.profile(0.0, 0.0), RiskProfile::Stable);
        assert_eq!(thresholds.profile(1.0, 1.0), RiskProfile::SustainedDecline);
    }
}
