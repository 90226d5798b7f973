use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::roster::normalize_name;

/// Identifier wrapper for a player. Cohort exclusion compares identities, never values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Derive an identifier from a display name, e.g. "Jacob  Smith" -> "jacob-smith".
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize_name(name);
        let slug = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        Self(slug)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Model-scored view of a player supplied by the external scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Career average Wins Above Replacement.
    pub career_war: f64,
    /// Predicted probability of significant decline within three years.
    pub decline_3yr: f64,
    /// Predicted probability of significant decline within five years.
    pub decline_5yr: f64,
}

impl PlayerSnapshot {
    pub fn new(
        name: impl Into<String>,
        career_war: f64,
        decline_3yr: f64,
        decline_5yr: f64,
    ) -> Self {
        let name = name.into();
        Self {
            id: PlayerId::from_name(&name),
            name,
            position: None,
            career_war,
            decline_3yr,
            decline_5yr,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = PlayerId(id.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn band(&self) -> WarBand {
        WarBand::classify(self.career_war)
    }
}

/// The front-office decision a recommendation is framed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionContext {
    /// The club currently controls the player.
    OwnedByTeam,
    FreeAgent,
    TradeCandidate,
}

impl DecisionContext {
    pub const ALL: [DecisionContext; 3] = [
        DecisionContext::OwnedByTeam,
        DecisionContext::FreeAgent,
        DecisionContext::TradeCandidate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DecisionContext::OwnedByTeam => "Currently Own",
            DecisionContext::FreeAgent => "Free Agent",
            DecisionContext::TradeCandidate => "Trade Candidate",
        }
    }

    /// How the contract-years input is read in this context.
    pub const fn years_meaning(self) -> &'static str {
        match self {
            DecisionContext::OwnedByTeam => "years of control remaining",
            DecisionContext::FreeAgent => "proposed contract length",
            DecisionContext::TradeCandidate => "years of control acquired",
        }
    }
}

impl fmt::Display for DecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DecisionContext {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ");
        match normalized.as_str() {
            "owned" | "own" | "owned by team" | "currently own" => Ok(Self::OwnedByTeam),
            "free agent" | "fa" => Ok(Self::FreeAgent),
            "trade" | "trade candidate" => Ok(Self::TradeCandidate),
            _ => Err(format!(
                "unknown decision context '{raw}' (expected owned, free-agent, or trade)"
            )),
        }
    }
}

/// Career WAR tiers. Every context classifies WAR through [`WarBand::classify`].
///
/// Bands are half-open on the lower edge: `[5, ∞)`, `[4, 5)`, `[3, 4)`, `[2, 3)`, `[1, 2)`, and
/// `(−∞, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarBand {
    Elite,
    AllStar,
    Starter,
    Regular,
    Fringe,
    Replacement,
}

impl WarBand {
    /// Highest band first.
    pub const ALL: [WarBand; 6] = [
        WarBand::Elite,
        WarBand::AllStar,
        WarBand::Starter,
        WarBand::Regular,
        WarBand::Fringe,
        WarBand::Replacement,
    ];

    /// NaN falls through to `Replacement`; callers that care reject it first.
    pub fn classify(career_war: f64) -> Self {
        if career_war >= 5.0 {
            WarBand::Elite
        } else if career_war >= 4.0 {
            WarBand::AllStar
        } else if career_war >= 3.0 {
            WarBand::Starter
        } else if career_war >= 2.0 {
            WarBand::Regular
        } else if career_war >= 1.0 {
            WarBand::Fringe
        } else {
            WarBand::Replacement
        }
    }

    /// Inclusive lower bound, `None` for the open-ended floor band.
    pub const fn lower_bound(self) -> Option<f64> {
        match self {
            WarBand::Elite => Some(5.0),
            WarBand::AllStar => Some(4.0),
            WarBand::Starter => Some(3.0),
            WarBand::Regular => Some(2.0),
            WarBand::Fringe => Some(1.0),
            WarBand::Replacement => None,
        }
    }

    /// Exclusive upper bound, `None` for the open-ended top band.
    pub const fn upper_bound(self) -> Option<f64> {
        match self {
            WarBand::Elite => None,
            WarBand::AllStar => Some(5.0),
            WarBand::Starter => Some(4.0),
            WarBand::Regular => Some(3.0),
            WarBand::Fringe => Some(2.0),
            WarBand::Replacement => Some(1.0),
        }
    }

    pub fn contains(self, career_war: f64) -> bool {
        let above_floor = self.lower_bound().map_or(true, |lower| career_war >= lower);
        let below_ceiling = self.upper_bound().map_or(true, |upper| career_war < upper);
        above_floor && below_ceiling
    }

    pub const fn label(self) -> &'static str {
        match self {
            WarBand::Elite => "5+ WAR",
            WarBand::AllStar => "4-5 WAR",
            WarBand::Starter => "3-4 WAR",
            WarBand::Regular => "2-3 WAR",
            WarBand::Fringe => "1-2 WAR",
            WarBand::Replacement => "below 1 WAR",
        }
    }
}

/// Contract length in years. The engine only requires it to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContractYears(u32);

impl ContractYears {
    pub const fn new(years: u32) -> Option<Self> {
        if years >= 1 {
            Some(Self(years))
        } else {
            None
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn term(self) -> ContractTerm {
        ContractTerm::from_years(self.0)
    }
}

impl fmt::Display for ContractYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            f.write_str("1 year")
        } else {
            write!(f, "{} years", self.0)
        }
    }
}

/// Contract term bucket using the 1 / 3 / 5 year cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractTerm {
    /// One year or the final year of control.
    Final,
    /// Two to three years.
    Short,
    /// Four to five years.
    Medium,
    /// Six or more years.
    Long,
}

impl ContractTerm {
    pub const fn from_years(years: u32) -> Self {
        match years {
            0..=1 => ContractTerm::Final,
            2..=3 => ContractTerm::Short,
            4..=5 => ContractTerm::Medium,
            _ => ContractTerm::Long,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContractTerm::Final => "final year",
            ContractTerm::Short => "short term (2-3 years)",
            ContractTerm::Medium => "medium term (4-5 years)",
            ContractTerm::Long => "long term (6+ years)",
        }
    }
}

/// Which decline model a probability came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineHorizon {
    ThreeYear,
    FiveYear,
}

impl DeclineHorizon {
    pub const fn label(self) -> &'static str {
        match self {
            DeclineHorizon::ThreeYear => "3-year",
            DeclineHorizon::FiveYear => "5-year",
        }
    }
}

impl fmt::Display for DeclineHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Combined reading of both decline horizons against a cell's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    /// Neither horizon elevated.
    Stable,
    /// Only the 5-year horizon elevated.
    LateDecline,
    /// Only the 3-year horizon elevated.
    EarlyDecline,
    /// Both horizons elevated.
    SustainedDecline,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 4] = [
        RiskProfile::Stable,
        RiskProfile::LateDecline,
        RiskProfile::EarlyDecline,
        RiskProfile::SustainedDecline,
    ];

    pub const fn from_flags(three_year_elevated: bool, five_year_elevated: bool) -> Self {
        match (three_year_elevated, five_year_elevated) {
            (false, false) => RiskProfile::Stable,
            (false, true) => RiskProfile::LateDecline,
            (true, false) => RiskProfile::EarlyDecline,
            (true, true) => RiskProfile::SustainedDecline,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskProfile::Stable => "low decline risk on both horizons",
            RiskProfile::LateDecline => "elevated 5-year decline risk",
            RiskProfile::EarlyDecline => "elevated 3-year decline risk",
            RiskProfile::SustainedDecline => "elevated decline risk on both horizons",
        }
    }
}
