use crate::infra::{
    load_roster, parse_context, parse_contract_years, parse_date, sample_roster,
    InMemoryRosterRepository,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use contract_advisor::advisory::{
    AdvisoryView, ContractAdvisory, ContractAdvisoryService, DecisionContext, RulesView,
};
use contract_advisor::config::{AppConfig, RosterConfig, TelemetryConfig};
use contract_advisor::error::AppError;
use contract_advisor::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Scored roster CSV (falls back to APP_ROSTER_CSV)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Player id or display name
    #[arg(long)]
    pub(crate) player: String,
    /// Decision context: owned, free-agent, or trade
    #[arg(long, value_parser = parse_context)]
    pub(crate) context: DecisionContext,
    /// Contract years (1-10); meaning depends on the context
    #[arg(long, value_parser = parse_contract_years)]
    pub(crate) years: u32,
    /// Print the advisory as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Date stamped on the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Scored roster CSV (falls back to APP_ROSTER_CSV)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Only list players at this position, e.g. SS
    #[arg(long)]
    pub(crate) position: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Print the table and audit as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Contract years used for every context
    #[arg(long, default_value = "3", value_parser = parse_contract_years)]
    pub(crate) years: u32,
    /// Date stamped on the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AdvisoryReport {
    as_of: NaiveDate,
    #[serde(flatten)]
    advisory: AdvisoryView,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        roster,
        player,
        context,
        years,
        json,
        as_of,
    } = args;

    let config = AppConfig::load()?;
    let repository = load_cli_roster(roster, &config.telemetry, &config.roster)?;
    let service = ContractAdvisoryService::new(Arc::new(repository));
    let advisory = service.advise(&player, context, years)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    if json {
        let report = AdvisoryReport {
            as_of,
            advisory: advisory.view(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Advisory payload unavailable: {err}"),
        }
    } else {
        render_advisory(&advisory, as_of);
    }

    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = load_cli_roster(args.roster, &config.telemetry, &config.roster)?;
    let service = ContractAdvisoryService::new(Arc::new(repository));
    let players = service.roster(args.position.as_deref())?;

    match args.position.as_deref() {
        Some(position) => println!("Roster ({position}): {} players", players.len()),
        None => println!("Roster: {} players", players.len()),
    }
    for player in &players {
        println!(
            "- {:<24} {:<4} WAR {:>5.2} | p3 {:.2} | p5 {:.2} | {}",
            player.name,
            player.position.as_deref().unwrap_or("-"),
            player.career_war,
            player.decline_3yr,
            player.decline_5yr,
            player.band().label()
        );
    }

    Ok(())
}

/// Installs logging before the import so duplicate-row warnings reach stderr.
fn load_cli_roster(
    explicit: Option<PathBuf>,
    telemetry_config: &TelemetryConfig,
    roster_config: &RosterConfig,
) -> Result<InMemoryRosterRepository, AppError> {
    telemetry::init(telemetry_config)?;
    load_roster(explicit, roster_config)
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let service = ContractAdvisoryService::new(Arc::new(InMemoryRosterRepository::default()));
    let view = RulesView::from(service.rule_table());

    if args.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Rule table payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Contract rule table v{}", view.version);
    for cell in &view.cells {
        println!(
            "\n{} / {} (3-year cutoff {:.2}, 5-year cutoff {:.2})",
            cell.context.label(),
            cell.band.label(),
            cell.thresholds.three_year,
            cell.thresholds.five_year
        );
        for (index, rule) in cell.rules.iter().enumerate() {
            let risks = rule
                .risks
                .iter()
                .map(|risk| risk.label())
                .collect::<Vec<_>>()
                .join(" or ");
            println!(
                "  {}. {} | {} -> {}",
                index + 1,
                risks,
                rule.years.describe(),
                rule.recommendation.label()
            );
        }
    }

    if view.clean {
        println!("\nAudit: every context, band, risk profile, and term resolves to one rule");
    } else {
        println!(
            "\nAudit: {} gaps, {} overlaps, {} misplaced rules",
            view.audit.gaps.len(),
            view.audit.overlaps.len(),
            view.audit.misplaced.len()
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { years, as_of } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let repository = InMemoryRosterRepository::new(sample_roster());
    let roster_size = repository.len();
    let service = ContractAdvisoryService::new(Arc::new(repository));

    println!("Contract advisor demo ({roster_size} sample players, {years}-year term)");

    for context in DecisionContext::ALL {
        println!("\n{} ({})", context.label(), context.years_meaning());
        for player in service.roster(None)? {
            match service.advise(&player.id.0, context, years) {
                Ok(advisory) => println!(
                    "  - {:<14} WAR {:>4.1} -> {} ({} differing comparables)",
                    player.name,
                    player.career_war,
                    advisory.outcome().text,
                    advisory.comparison.alternatives.len()
                ),
                Err(err) => println!("  - {:<14} unavailable: {err}", player.name),
            }
        }
    }

    println!();
    let featured = service.advise("Jacob Smith", DecisionContext::FreeAgent, years)?;
    render_advisory(&featured, as_of);

    Ok(())
}

pub(crate) fn render_advisory(advisory: &ContractAdvisory, as_of: NaiveDate) {
    let outcome = advisory.outcome();
    let comparison = &advisory.comparison;

    println!("Contract advisory for {} ({as_of})", advisory.player.name);
    println!(
        "Context: {} | {} of {}",
        outcome.context.label(),
        outcome.years,
        outcome.context.years_meaning()
    );
    println!(
        "Inputs: career WAR {:.2} ({}) | 3-year decline {:.2} | 5-year decline {:.2}",
        advisory.player.career_war,
        outcome.band.label(),
        advisory.player.decline_3yr,
        advisory.player.decline_5yr
    );
    println!(
        "Recommendation: {} [{}]",
        outcome.text,
        outcome.recommendation.stance().label()
    );

    println!("\nReasoning");
    for entry in &outcome.trace {
        println!("- {}", entry.notes);
    }

    println!(
        "\nComparable players within 1.0 WAR: {} ({} agree)",
        comparison.cohort_size, comparison.agreeing
    );
    if comparison.alternatives.is_empty() {
        println!("No comparable player receives a different recommendation");
    } else {
        for alternative in &comparison.alternatives {
            println!(
                "- {:<14} WAR {:>4.1} | p3 {:.2} | p5 {:.2} -> {}",
                alternative.player.name,
                alternative.player.career_war,
                alternative.player.decline_3yr,
                alternative.player.decline_5yr,
                alternative.text
            );
        }
    }

    for skipped in &comparison.skipped {
        println!("Skipped {}: {}", skipped.name, skipped.reason);
    }

    println!("\nRule table v{}", outcome.table_version);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_against_the_sample_roster() {
        let args = DemoArgs {
            years: 2,
            as_of: Some(NaiveDate::from_ymd_opt(2024, 11, 4).expect("valid date")),
        };
        run_demo(args).expect("demo completes");
    }

    #[test]
    fn rules_command_prints_the_table() {
        run_rules(RulesArgs::default()).expect("rules print");
        run_rules(RulesArgs { json: true }).expect("rules print as json");
    }

    #[test]
    fn cli_roster_load_installs_logging_before_import() {
        let path = std::env::temp_dir().join(format!(
            "contract-advisor-cli-roster-{}.csv",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "Name,Pos,avg_WAR_career,pred_decline_3,pred_decline_5\n\
             Jacob Smith,SS,4.2,0.35,0.61\n\
             Jacob Smith,2B,0.5,0.90,0.90\n\
             Max Johnson,CF,1.1,0.72,0.80\n",
        )
        .expect("write roster export");

        let telemetry_config = TelemetryConfig {
            log_level: "warn".to_string(),
        };
        let repository = load_cli_roster(
            Some(path.clone()),
            &telemetry_config,
            &RosterConfig::default(),
        );
        let _ = std::fs::remove_file(&path);

        let repository = repository.expect("roster loads");
        assert_eq!(repository.len(), 2);
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn advisory_report_flattens_the_view() {
        let service = ContractAdvisoryService::new(Arc::new(InMemoryRosterRepository::new(
            sample_roster(),
        )));
        let advisory = service
            .advise("Max Johnson", DecisionContext::TradeCandidate, 4)
            .expect("advise");
        let report = AdvisoryReport {
            as_of: NaiveDate::from_ymd_opt(2024, 11, 4).expect("valid date"),
            advisory: advisory.view(),
        };

        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["as_of"], "2024-11-04");
        assert_eq!(json["recommendationCode"], "potential_risk");
        assert!(json["cohortAlternatives"].is_array());
    }
}
