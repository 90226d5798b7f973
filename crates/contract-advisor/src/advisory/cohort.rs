use serde::Serialize;
use tracing::warn;

use super::domain::{DecisionContext, PlayerId, PlayerSnapshot};
use super::engine::{
    Recommendation, RecommendationEngine, RecommendationError, RecommendationOutcome,
};

/// Maximum career WAR distance (inclusive) for a player to count as comparable.
pub const COHORT_WAR_RADIUS: f64 = 1.0;

/// Re-runs the engine over similar-WAR players and keeps the ones it treats differently.
#[derive(Debug, Clone, Copy)]
pub struct CohortComparator {
    radius: f64,
}

impl Default for CohortComparator {
    fn default() -> Self {
        Self {
            radius: COHORT_WAR_RADIUS,
        }
    }
}

impl CohortComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn within_radius(&self, focal: &PlayerSnapshot, member: &PlayerSnapshot) -> bool {
        (member.career_war - focal.career_war).abs() <= self.radius
    }

    /// Compare the focal player against `population` under the same context and term.
    ///
    /// The focal player is excluded by id. Members whose own inputs are invalid, including a NaN
    /// career WAR, are skipped and reported; an `Unresolved` member means the table is broken and
    /// is returned as an error.
    pub fn compare(
        &self,
        engine: &RecommendationEngine,
        focal: &PlayerSnapshot,
        population: &[PlayerSnapshot],
        context: DecisionContext,
        years: u32,
    ) -> Result<CohortComparison, RecommendationError> {
        let focal_outcome = engine.evaluate(focal, context, years)?;

        let mut comparison = CohortComparison {
            focal_recommendation: focal_outcome.recommendation,
            cohort_size: 0,
            agreeing: 0,
            alternatives: Vec::new(),
            skipped: Vec::new(),
            focal: focal_outcome,
        };

        for member in population {
            if member.id == focal.id {
                continue;
            }

            // NaN WAR cannot be placed against the radius; evaluate it so it is reported.
            if self.within_radius(focal, member) {
                comparison.cohort_size += 1;
            } else if !member.career_war.is_nan() {
                continue;
            }

            let outcome = match engine.evaluate(member, context, years) {
                Ok(outcome) => outcome,
                Err(err) if err.is_invalid_input() => {
                    warn!(player = %member.id, error = %err, "skipping cohort member");
                    comparison.skipped.push(SkippedMember {
                        player_id: member.id.clone(),
                        name: member.name.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };

            if outcome.recommendation == comparison.focal_recommendation {
                comparison.agreeing += 1;
            } else {
                comparison.alternatives.push(CohortAlternative {
                    player: member.clone(),
                    recommendation: outcome.recommendation,
                    text: outcome.text,
                });
            }
        }

        Ok(comparison)
    }
}

/// A comparable player whose recommendation differs from the focal player's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortAlternative {
    pub player: PlayerSnapshot,
    pub recommendation: Recommendation,
    pub text: String,
}

/// A comparable player that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMember {
    pub player_id: PlayerId,
    pub name: String,
    pub reason: String,
}

/// Focal outcome plus the disagreeing members of its WAR cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortComparison {
    pub focal: RecommendationOutcome,
    pub focal_recommendation: Recommendation,
    /// Members within the radius, excluding the focal player. NaN-WAR members only appear in
    /// `skipped`.
    pub cohort_size: usize,
    /// Members that received the focal recommendation.
    pub agreeing: usize,
    pub alternatives: Vec<CohortAlternative>,
    pub skipped: Vec<SkippedMember>,
}

impl CohortComparison {
    pub fn is_unanimous(&self) -> bool {
        self.alternatives.is_empty()
    }
}
