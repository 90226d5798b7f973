use chrono::NaiveDate;
use contract_advisor::advisory::{
    DecisionContext, PlayerId, PlayerSnapshot, RepositoryError, RosterRepository,
    MAX_CONTRACT_YEARS,
};
use contract_advisor::config::RosterConfig;
use contract_advisor::error::AppError;
use contract_advisor::roster::RosterImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only roster loaded once at startup.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    players: Arc<Vec<PlayerSnapshot>>,
}

impl InMemoryRosterRepository {
    pub(crate) fn new(players: Vec<PlayerSnapshot>) -> Self {
        Self {
            players: Arc::new(players),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.players.len()
    }
}

impl RosterRepository for InMemoryRosterRepository {
    fn fetch(&self, id: &PlayerId) -> Result<Option<PlayerSnapshot>, RepositoryError> {
        Ok(self.players.iter().find(|player| &player.id == id).cloned())
    }

    fn population(&self) -> Result<Vec<PlayerSnapshot>, RepositoryError> {
        Ok(self.players.as_ref().clone())
    }
}

/// Import the roster export named on the command line or in `APP_ROSTER_CSV`.
pub(crate) fn load_roster(
    explicit: Option<PathBuf>,
    config: &RosterConfig,
) -> Result<InMemoryRosterRepository, AppError> {
    let path = config.resolve(explicit)?;
    let import = RosterImporter::from_path(&path)?;
    if !import.duplicates.is_empty() {
        warn!(
            path = %path.display(),
            duplicates = import.duplicates.len(),
            "roster export contained duplicate players"
        );
    }
    Ok(InMemoryRosterRepository::new(import.players))
}

/// Built-in scored roster used by the demo and by `serve` when no export is configured.
pub(crate) fn sample_roster() -> Vec<PlayerSnapshot> {
    vec![
        PlayerSnapshot::new("Jacob Smith", 4.2, 0.35, 0.61).with_position("SS"),
        PlayerSnapshot::new("Max Johnson", 1.1, 0.72, 0.80).with_position("CF"),
        PlayerSnapshot::new("Alex Adams", 4.8, 0.20, 0.25).with_position("2B"),
        PlayerSnapshot::new("Luis Ortega", 3.6, 0.58, 0.66).with_position("SS"),
        PlayerSnapshot::new("Derek Hale", 5.1, 0.30, 0.40).with_position("C"),
        PlayerSnapshot::new("Sam Whitaker", 3.3, 0.20, 0.30).with_position("1B"),
        PlayerSnapshot::new("Tony Reyes", 6.4, 0.82, 0.35).with_position("RF"),
        PlayerSnapshot::new("Caleb Foster", 0.4, 0.91, 0.93).with_position("3B"),
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_context(raw: &str) -> Result<DecisionContext, String> {
    raw.parse::<DecisionContext>()
}

pub(crate) fn parse_contract_years(raw: &str) -> Result<u32, String> {
    let years = raw
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("failed to parse '{raw}' as a number of years ({err})"))?;
    if (1..=MAX_CONTRACT_YEARS).contains(&years) {
        Ok(years)
    } else {
        Err(format!(
            "contract years must be between 1 and {MAX_CONTRACT_YEARS} (got {years})"
        ))
    }
}
