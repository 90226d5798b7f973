use super::super::domain::{
    ContractYears, DecisionContext, DeclineHorizon, PlayerSnapshot, RiskProfile, WarBand,
};
use super::table::{DeclineThresholds, RuleTable};
use super::{Recommendation, RecommendationError, TraceEntry, TraceFactor};

/// Validated inputs for a single evaluation.
pub(crate) struct EvaluationInputs {
    pub career_war: f64,
    pub decline_3yr: f64,
    pub decline_5yr: f64,
    pub years: ContractYears,
}

pub(crate) struct Resolution {
    pub band: WarBand,
    pub risk: RiskProfile,
    pub thresholds: DeclineThresholds,
    pub recommendation: Recommendation,
    pub trace: Vec<TraceEntry>,
}

pub(crate) fn validate(
    player: &PlayerSnapshot,
    years: u32,
) -> Result<EvaluationInputs, RecommendationError> {
    if player.career_war.is_nan() {
        return Err(RecommendationError::InvalidCareerWar {
            value: player.career_war,
        });
    }

    check_probability(DeclineHorizon::ThreeYear, player.decline_3yr)?;
    check_probability(DeclineHorizon::FiveYear, player.decline_5yr)?;

    let years = ContractYears::new(years).ok_or(RecommendationError::InvalidYears { years })?;

    Ok(EvaluationInputs {
        career_war: player.career_war,
        decline_3yr: player.decline_3yr,
        decline_5yr: player.decline_5yr,
        years,
    })
}

fn check_probability(horizon: DeclineHorizon, value: f64) -> Result<(), RecommendationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RecommendationError::InvalidProbability { horizon, value })
    }
}

pub(crate) fn resolve(
    table: &RuleTable,
    context: DecisionContext,
    inputs: &EvaluationInputs,
) -> Result<Resolution, RecommendationError> {
    let band = WarBand::classify(inputs.career_war);
    let years = inputs.years.get();

    let cell = table
        .cell(context, band)
        .ok_or(RecommendationError::Unresolved {
            context,
            band,
            risk: None,
            years,
        })?;

    let thresholds = cell.thresholds;
    let risk = thresholds.profile(inputs.decline_3yr, inputs.decline_5yr);

    let (rule_index, rule) = cell
        .resolve(risk, years)
        .ok_or(RecommendationError::Unresolved {
            context,
            band,
            risk: Some(risk),
            years,
        })?;

    let mut trace = Vec::with_capacity(5);
    trace.push(TraceEntry {
        factor: TraceFactor::CareerWar,
        notes: format!(
            "career WAR {:.2} falls in the {} band",
            inputs.career_war,
            band.label()
        ),
    });
    trace.push(horizon_entry(
        DeclineHorizon::ThreeYear,
        inputs.decline_3yr,
        thresholds.three_year,
    ));
    trace.push(horizon_entry(
        DeclineHorizon::FiveYear,
        inputs.decline_5yr,
        thresholds.five_year,
    ));
    trace.push(TraceEntry {
        factor: TraceFactor::ContractTerm,
        notes: format!(
            "{} of {} reads as {}",
            inputs.years,
            context.years_meaning(),
            inputs.years.term().label()
        ),
    });
    trace.push(TraceEntry {
        factor: TraceFactor::Rule,
        notes: format!(
            "{} / {} rule #{} ({}, {}) selects '{}'",
            context.label(),
            band.label(),
            rule_index + 1,
            risk.label(),
            rule.years.describe(),
            rule.recommendation.label()
        ),
    });

    Ok(Resolution {
        band,
        risk,
        thresholds,
        recommendation: rule.recommendation,
        trace,
    })
}

fn horizon_entry(horizon: DeclineHorizon, probability: f64, threshold: f64) -> TraceEntry {
    let factor = match horizon {
        DeclineHorizon::ThreeYear => TraceFactor::ThreeYearDecline,
        DeclineHorizon::FiveYear => TraceFactor::FiveYearDecline,
    };
    let reading = if probability >= threshold {
        "at or above"
    } else {
        "below"
    };

    TraceEntry {
        factor,
        notes: format!(
            "{horizon} decline probability {probability:.2} is {reading} the {threshold:.2} cutoff"
        ),
    }
}
