//! Scorecard result codes and leader-board categories.

use crate::error::LeagueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one plate appearance.
///
/// An unrecorded turn is represented as `None` on the turn itself, never as a
/// variant here.
///
/// Older scorecards used single-character codes (`1`–`4` for bases reached,
/// `B` for a walk); those are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TurnResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    Error,
    Strikeout,
    Out,
}

impl TurnResult {
    /// Canonical scorecard code.
    pub fn code(self) -> &'static str {
        match self {
            TurnResult::Single => "H",
            TurnResult::Double => "2B",
            TurnResult::Triple => "3B",
            TurnResult::HomeRun => "HR",
            TurnResult::Walk => "BB",
            TurnResult::Error => "Error",
            TurnResult::Strikeout => "K",
            TurnResult::Out => "Out",
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(
            self,
            TurnResult::Single | TurnResult::Double | TurnResult::Triple | TurnResult::HomeRun
        )
    }
}

impl fmt::Display for TurnResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TurnResult {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "H" | "1" | "1B" => Ok(TurnResult::Single),
            "2B" | "2" => Ok(TurnResult::Double),
            "3B" | "3" => Ok(TurnResult::Triple),
            "HR" | "4" => Ok(TurnResult::HomeRun),
            "BB" | "B" => Ok(TurnResult::Walk),
            "ERROR" | "E" => Ok(TurnResult::Error),
            "K" => Ok(TurnResult::Strikeout),
            "OUT" | "O" => Ok(TurnResult::Out),
            _ => Err(LeagueError::InvalidTurnResult {
                code: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for TurnResult {
    type Error = LeagueError;

    fn try_from(s: String) -> Result<Self, LeagueError> {
        s.parse()
    }
}

impl From<TurnResult> for String {
    fn from(result: TurnResult) -> Self {
        result.code().to_string()
    }
}

/// Statistical category for league leader boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StatCategory {
    /// Batting average (requires a minimum number of at-bats)
    Avg,
    /// Home runs
    Hr,
    /// Runs batted in
    Rbi,
    /// Hits
    H,
    /// Runs scored
    R,
    /// Doubles
    Doubles,
    /// Triples
    Triples,
    /// Walks
    Bb,
    /// Stolen bases
    Sb,
    /// Strikeouts
    K,
}

impl StatCategory {
    pub const ALL: [StatCategory; 10] = [
        StatCategory::Avg,
        StatCategory::Hr,
        StatCategory::Rbi,
        StatCategory::H,
        StatCategory::R,
        StatCategory::Doubles,
        StatCategory::Triples,
        StatCategory::Bb,
        StatCategory::Sb,
        StatCategory::K,
    ];
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatCategory::Avg => "AVG",
            StatCategory::Hr => "HR",
            StatCategory::Rbi => "RBI",
            StatCategory::H => "H",
            StatCategory::R => "R",
            StatCategory::Doubles => "2B",
            StatCategory::Triples => "3B",
            StatCategory::Bb => "BB",
            StatCategory::Sb => "SB",
            StatCategory::K => "K",
        };
        write!(f, "{}", s)
    }
}
