//! Status enums for players, lineup entries, matches and users.

use crate::error::LeagueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a lineup entry within one match.
///
/// Statuses form a fixed ring used by the scorecard editor:
/// titular → lesionado → suplente → ausente → titular.
///
/// # Examples
///
/// ```rust
/// use softball_league::LineupStatus;
///
/// let s = LineupStatus::Titular;
/// assert_eq!(s.next(), LineupStatus::Lesionado);
/// assert_eq!(s.next().next().next().next(), s);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineupStatus {
    /// Starter
    Titular,
    /// Injured (also set on the outgoing player of a substitution)
    Lesionado,
    /// Bench
    #[default]
    Suplente,
    /// Absent
    Ausente,
}

impl LineupStatus {
    /// Next status in the editor ring.
    pub fn next(self) -> Self {
        match self {
            LineupStatus::Titular => LineupStatus::Lesionado,
            LineupStatus::Lesionado => LineupStatus::Suplente,
            LineupStatus::Suplente => LineupStatus::Ausente,
            LineupStatus::Ausente => LineupStatus::Titular,
        }
    }

    /// Legacy documents stored a `starter` boolean instead of a status.
    pub fn from_starter_flag(starter: bool) -> Self {
        if starter {
            LineupStatus::Titular
        } else {
            LineupStatus::Suplente
        }
    }
}

impl fmt::Display for LineupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LineupStatus::Titular => "titular",
            LineupStatus::Lesionado => "lesionado",
            LineupStatus::Suplente => "suplente",
            LineupStatus::Ausente => "ausente",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LineupStatus {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "titular" | "starter" => Ok(LineupStatus::Titular),
            "lesionado" | "injured" => Ok(LineupStatus::Lesionado),
            "suplente" | "bench" => Ok(LineupStatus::Suplente),
            "ausente" | "absent" => Ok(LineupStatus::Ausente),
            _ => Err(LeagueError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Eligibility of a rostered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerEstado {
    #[default]
    Habilitado,
    Suspendido,
}

impl PlayerEstado {
    pub fn toggled(self) -> Self {
        match self {
            PlayerEstado::Habilitado => PlayerEstado::Suspendido,
            PlayerEstado::Suspendido => PlayerEstado::Habilitado,
        }
    }

    /// Lenient parse used by CSV import: anything but "suspendido" is enabled.
    pub fn from_csv(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("suspendido") {
            PlayerEstado::Suspendido
        } else {
            PlayerEstado::Habilitado
        }
    }
}

impl fmt::Display for PlayerEstado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerEstado::Habilitado => "habilitado",
            PlayerEstado::Suspendido => "suspendido",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PlayerEstado {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "habilitado" | "enabled" => Ok(PlayerEstado::Habilitado),
            "suspendido" | "suspended" => Ok(PlayerEstado::Suspendido),
            _ => Err(LeagueError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Lifecycle of a match: scheduled → live → finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MatchStatus {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" | "programado" => Ok(MatchStatus::Scheduled),
            "live" | "en-vivo" | "envivo" => Ok(MatchStatus::Live),
            "finished" | "finalizado" => Ok(MatchStatus::Finished),
            _ => Err(LeagueError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Role of an admin panel user.
///
/// Unknown or missing role strings load as [`Role::Invitado`], which has no
/// edit rights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access
    Admin,
    /// Team delegate: edits their own team's lineups
    Delegado,
    /// Scorer: edits any lineup
    Anotador,
    /// Read-only
    #[default]
    Invitado,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "delegado" => Role::Delegado,
            "anotador" => Role::Anotador,
            _ => Role::Invitado,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Delegado => "delegado",
            Role::Anotador => "anotador",
            Role::Invitado => "invitado",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_status_ring_closes() {
        for start in [
            LineupStatus::Titular,
            LineupStatus::Lesionado,
            LineupStatus::Suplente,
            LineupStatus::Ausente,
        ] {
            assert_eq!(start.next().next().next().next(), start);
            assert_ne!(start.next(), start);
        }
    }

    #[test]
    fn test_lineup_status_order() {
        assert_eq!(LineupStatus::Titular.next(), LineupStatus::Lesionado);
        assert_eq!(LineupStatus::Lesionado.next(), LineupStatus::Suplente);
        assert_eq!(LineupStatus::Suplente.next(), LineupStatus::Ausente);
        assert_eq!(LineupStatus::Ausente.next(), LineupStatus::Titular);
    }

    #[test]
    fn test_lineup_status_parse() {
        assert_eq!("Titular".parse::<LineupStatus>().unwrap(), LineupStatus::Titular);
        assert_eq!("bench".parse::<LineupStatus>().unwrap(), LineupStatus::Suplente);
        assert!("captain".parse::<LineupStatus>().is_err());
    }

    #[test]
    fn test_lineup_status_serde() {
        let json = serde_json::to_string(&LineupStatus::Lesionado).unwrap();
        assert_eq!(json, "\"lesionado\"");
        let back: LineupStatus = serde_json::from_str("\"ausente\"").unwrap();
        assert_eq!(back, LineupStatus::Ausente);
    }

    #[test]
    fn test_starter_flag_migration() {
        assert_eq!(LineupStatus::from_starter_flag(true), LineupStatus::Titular);
        assert_eq!(LineupStatus::from_starter_flag(false), LineupStatus::Suplente);
    }

    #[test]
    fn test_estado_from_csv() {
        assert_eq!(PlayerEstado::from_csv("SUSPENDIDO"), PlayerEstado::Suspendido);
        assert_eq!(PlayerEstado::from_csv("habilitado"), PlayerEstado::Habilitado);
        assert_eq!(PlayerEstado::from_csv("whatever"), PlayerEstado::Habilitado);
        assert_eq!(PlayerEstado::from_csv(""), PlayerEstado::Habilitado);
    }

    #[test]
    fn test_estado_toggle() {
        assert_eq!(PlayerEstado::Habilitado.toggled(), PlayerEstado::Suspendido);
        assert_eq!(PlayerEstado::Suspendido.toggled(), PlayerEstado::Habilitado);
    }

    #[test]
    fn test_match_status_parse() {
        assert_eq!("live".parse::<MatchStatus>().unwrap(), MatchStatus::Live);
        assert_eq!("finalizado".parse::<MatchStatus>().unwrap(), MatchStatus::Finished);
        assert!("postponed".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn test_role_unknown_is_invitado() {
        let role: Role = serde_json::from_str("\"superuser\"").unwrap();
        assert_eq!(role, Role::Invitado);
        let admin: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(admin, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Delegado).unwrap(), "\"delegado\"");
    }
}
