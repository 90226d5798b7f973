use serde::{Deserialize, Serialize};

use super::super::domain::{ContractYears, DecisionContext};

/// Fixed catalog of contract recommendations. Each variant belongs to one decision context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    // Currently own
    ExtendLongTerm,
    Extend,
    ExtendWithClubOptions,
    ExtendShortTerm,
    RetainAndMonitor,
    RetainDoNotExtend,
    ShopAtDeadline,
    TradeWhileValueHigh,
    TradeAway,
    Release,
    // Free agent
    SignApproved,
    SignWithClubOptions,
    HigherAavShortTerm,
    TwoToThreeYearDeal,
    OneYearOrTeamOptions,
    MinorLeagueDeal,
    PassOnSigning,
    // Trade candidate
    TradeForAndExtend,
    TradeForDoNotExtend,
    TradeForRental,
    PotentialRisk,
    LowCostDepthOnly,
    DoNotTrade,
}

/// Coarse direction of a recommendation for dashboards that colour-code results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Pursue,
    Hedge,
    Avoid,
}

impl Stance {
    pub const fn label(self) -> &'static str {
        match self {
            Stance::Pursue => "pursue",
            Stance::Hedge => "hedge",
            Stance::Avoid => "avoid",
        }
    }
}

impl Recommendation {
    pub const ALL: [Recommendation; 23] = [
        Recommendation::ExtendLongTerm,
        Recommendation::Extend,
        Recommendation::ExtendWithClubOptions,
        Recommendation::ExtendShortTerm,
        Recommendation::RetainAndMonitor,
        Recommendation::RetainDoNotExtend,
        Recommendation::ShopAtDeadline,
        Recommendation::TradeWhileValueHigh,
        Recommendation::TradeAway,
        Recommendation::Release,
        Recommendation::SignApproved,
        Recommendation::SignWithClubOptions,
        Recommendation::HigherAavShortTerm,
        Recommendation::TwoToThreeYearDeal,
        Recommendation::OneYearOrTeamOptions,
        Recommendation::MinorLeagueDeal,
        Recommendation::PassOnSigning,
        Recommendation::TradeForAndExtend,
        Recommendation::TradeForDoNotExtend,
        Recommendation::TradeForRental,
        Recommendation::PotentialRisk,
        Recommendation::LowCostDepthOnly,
        Recommendation::DoNotTrade,
    ];

    pub const fn context(self) -> DecisionContext {
        match self {
            Recommendation::ExtendLongTerm
            | Recommendation::Extend
            | Recommendation::ExtendWithClubOptions
            | Recommendation::ExtendShortTerm
            | Recommendation::RetainAndMonitor
            | Recommendation::RetainDoNotExtend
            | Recommendation::ShopAtDeadline
            | Recommendation::TradeWhileValueHigh
            | Recommendation::TradeAway
            | Recommendation::Release => DecisionContext::OwnedByTeam,
            Recommendation::SignApproved
            | Recommendation::SignWithClubOptions
            | Recommendation::HigherAavShortTerm
            | Recommendation::TwoToThreeYearDeal
            | Recommendation::OneYearOrTeamOptions
            | Recommendation::MinorLeagueDeal
            | Recommendation::PassOnSigning => DecisionContext::FreeAgent,
            Recommendation::TradeForAndExtend
            | Recommendation::TradeForDoNotExtend
            | Recommendation::TradeForRental
            | Recommendation::PotentialRisk
            | Recommendation::LowCostDepthOnly
            | Recommendation::DoNotTrade => DecisionContext::TradeCandidate,
        }
    }

    pub const fn stance(self) -> Stance {
        match self {
            Recommendation::ExtendLongTerm
            | Recommendation::Extend
            | Recommendation::SignApproved
            | Recommendation::TradeForAndExtend
            | Recommendation::TradeForRental => Stance::Pursue,
            Recommendation::ExtendWithClubOptions
            | Recommendation::ExtendShortTerm
            | Recommendation::RetainAndMonitor
            | Recommendation::RetainDoNotExtend
            | Recommendation::SignWithClubOptions
            | Recommendation::HigherAavShortTerm
            | Recommendation::TwoToThreeYearDeal
            | Recommendation::OneYearOrTeamOptions
            | Recommendation::MinorLeagueDeal
            | Recommendation::TradeForDoNotExtend
            | Recommendation::PotentialRisk
            | Recommendation::LowCostDepthOnly => Stance::Hedge,
            Recommendation::ShopAtDeadline
            | Recommendation::TradeWhileValueHigh
            | Recommendation::TradeAway
            | Recommendation::Release
            | Recommendation::PassOnSigning
            | Recommendation::DoNotTrade => Stance::Avoid,
        }
    }

    /// Player-agnostic wording, used where no player is in scope (tables, audits).
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::ExtendLongTerm => "Extend: pursue a long-term extension",
            Recommendation::Extend => "Extend",
            Recommendation::ExtendWithClubOptions => "Extend with club options on the back end",
            Recommendation::ExtendShortTerm => "Re-sign on a short extension (1-2 years)",
            Recommendation::RetainAndMonitor => {
                "Retain and monitor; revisit an extension closer to expiry"
            }
            Recommendation::RetainDoNotExtend => "Retain but do not extend",
            Recommendation::ShopAtDeadline => "Shop before the trade deadline",
            Recommendation::TradeWhileValueHigh => "Trade while value is high",
            Recommendation::TradeAway => "Trade away/DFA/release",
            Recommendation::Release => "Release or designate for assignment",
            Recommendation::SignApproved => "Sign the free agent for the proposed term",
            Recommendation::SignWithClubOptions => "Sign with club options beyond year three",
            Recommendation::HigherAavShortTerm => "Offer a higher AAV on a short contract",
            Recommendation::TwoToThreeYearDeal => "2-3 year deal",
            Recommendation::OneYearOrTeamOptions => {
                "Recommend signing to a 1-year contract or with team options"
            }
            Recommendation::MinorLeagueDeal => "Minor league deal with a spring training invite",
            Recommendation::PassOnSigning => "Pass on signing",
            Recommendation::TradeForAndExtend => "Trade for the player and extend",
            Recommendation::TradeForDoNotExtend => "Trade for the player but do not extend",
            Recommendation::TradeForRental => "Trade recommended as a rental",
            Recommendation::PotentialRisk => "Potential risk: limit the prospect cost",
            Recommendation::LowCostDepthOnly => "Acquire only as low-cost depth",
            Recommendation::DoNotTrade => "Do not trade for the player",
        }
    }

    /// Dashboard wording with the player's name and the contract term filled in.
    pub fn render(self, player_name: &str, years: ContractYears) -> String {
        match self {
            Recommendation::SignApproved => {
                format!("Sign FA {player_name} for {years} approved")
            }
            Recommendation::TradeForAndExtend => format!("Trade for {player_name} and extend"),
            Recommendation::TradeForDoNotExtend => {
                format!("Trade for {player_name} but do not extend")
            }
            Recommendation::DoNotTrade => format!("DO NOT TRADE FOR {player_name}"),
            other => other.label().to_string(),
        }
    }
}
