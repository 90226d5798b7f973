//! Contract recommendation engine, cohort comparison, and the service and router around them.
//!
//! Every evaluation runs the same versioned rule table; the cohort comparator re-runs it over
//! players with similar career WAR and reports the ones that land on a different recommendation.

pub mod cohort;
pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use cohort::{
    CohortAlternative, CohortComparator, CohortComparison, SkippedMember, COHORT_WAR_RADIUS,
};
pub use domain::{
    ContractTerm, ContractYears, DecisionContext, DeclineHorizon, PlayerId, PlayerSnapshot,
    RiskProfile, WarBand,
};
pub use engine::{
    recommend, DeclineThresholds, Recommendation, RecommendationEngine, RecommendationError,
    RecommendationOutcome, RuleAudit, RuleTable, Stance, TraceEntry, TraceFactor,
    RULE_TABLE_VERSION,
};
pub use repository::{RepositoryError, RosterRepository};
pub use router::{advisory_router, MAX_CONTRACT_YEARS};
pub use service::{AdvisoryServiceError, ContractAdvisory, ContractAdvisoryService};
pub use views::{AdvisoryView, CohortAlternativeView, RosterEntryView, RulesView};
