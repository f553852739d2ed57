//! Data models for the league document
//!
//! Field names on the wire follow the admin panel's JSON document
//! (`equipos`, `jugadores`, `partidos`, `usuarios`). Numeric fields are read
//! leniently because older documents stored them as form strings.

use crate::cli::types::{
    LineupStatus, MatchId, MatchStatus, PlayerEstado, PlayerId, Role, TeamId, TurnResult, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Number of turn slots the scorecard editor exposes per player per match.
pub const TURN_SLOTS: usize = 5;

/// Maximum RBI that can be credited on a single turn.
pub const MAX_RBI_PER_TURN: u8 = 4;

/// Season cumulative batting stats for a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(default, deserialize_with = "lenient::u32")]
    pub ab: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub h: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub hr: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub rbi: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub r: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub pa: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub doubles: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub triples: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub bb: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub k: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub sb: u32,
    /// Formatted batting average (".333"); empty when never computed.
    #[serde(default, deserialize_with = "lenient::string")]
    pub avg: String,
}

/// A rostered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub dorsal: u32,
    #[serde(default)]
    pub posicion: String,
    #[serde(rename = "equipoId")]
    pub team_id: TeamId,
    #[serde(default)]
    pub foto: String,
    #[serde(default)]
    pub estado: PlayerEstado,
    /// Approval flag (age verified by the league).
    #[serde(default)]
    pub verificado: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub altura: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub peso: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub edad: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub temporada: String,
    #[serde(default)]
    pub stats: SeasonStats,
}

/// Admin-entered standings override; each field wins over the computed value on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualStanding {
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
}

impl ManualStanding {
    pub fn is_empty(&self) -> bool {
        self.w.is_none() && self.l.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub nombre_corto: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub color_secundario: String,
    #[serde(default)]
    pub escudo: String,
    #[serde(default)]
    pub imagen: String,
    #[serde(default)]
    pub entrenador: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub telefono: String,
    #[serde(default, skip_serializing_if = "ManualStanding::is_empty")]
    pub manual_stats: ManualStanding,
}

/// One line of a match box score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxLine {
    #[serde(default, deserialize_with = "lenient::u32")]
    pub ab: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub h: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub hr: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub rbi: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub r: u32,
}

/// One at-bat on the scorecard. A turn without a result is not yet recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    #[serde(default, deserialize_with = "lenient::turn_result")]
    pub result: Option<TurnResult>,
    #[serde(default, alias = "sb")]
    pub stolen_base: bool,
    #[serde(default, rename = "run", alias = "scoredRun")]
    pub scored_run: bool,
    #[serde(default, deserialize_with = "lenient::rbi")]
    pub rbi: u8,
    #[serde(default, alias = "dir", skip_serializing_if = "Option::is_none")]
    pub hit_direction: Option<String>,
}

impl Turn {
    pub fn is_recorded(&self) -> bool {
        self.result.is_some()
    }
}

/// Fielding tally for one player in one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseTally {
    #[serde(default, deserialize_with = "lenient::u32")]
    pub outs: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub errors: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub assists: u32,
}

/// A player's line on one team's lineup for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupEntry {
    pub player_id: PlayerId,
    #[serde(default, rename = "order", alias = "battingOrder", deserialize_with = "lenient::u32")]
    pub batting_order: u32,
    #[serde(default, rename = "position", alias = "fieldPosition")]
    pub field_position: String,
    #[serde(default)]
    pub status: LineupStatus,
    #[serde(default)]
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub defense: DefenseTally,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces_player: Option<PlayerId>,
}

impl LineupEntry {
    pub fn new(player_id: PlayerId, batting_order: u32, field_position: impl Into<String>) -> Self {
        Self {
            player_id,
            batting_order,
            field_position: field_position.into(),
            status: LineupStatus::Suplente,
            turns: Vec::new(),
            defense: DefenseTally::default(),
            replaced_by: None,
            replaces_player: None,
        }
    }
}

/// Append-only audit record on a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub at: DateTime<Utc>,
    pub user: String,
    pub action: String,
}

/// A message on a match thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub at: DateTime<Utc>,
    pub user: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub hora: String,
    #[serde(default)]
    pub campo: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub jornada: Option<String>,
    #[serde(default)]
    pub arbitro: String,
    #[serde(rename = "localId")]
    pub local: TeamId,
    #[serde(rename = "visitanteId")]
    pub visitante: TeamId,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub bitacora: String,
    #[serde(default)]
    pub change_log: Vec<ChangeLogEntry>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub local_score: u32,
    #[serde(default, deserialize_with = "lenient::u32")]
    pub visit_score: u32,
    #[serde(default)]
    pub player_stats: BTreeMap<PlayerId, BoxLine>,
    #[serde(default)]
    pub lineup: BTreeMap<TeamId, Vec<LineupEntry>>,
}

impl Match {
    pub fn involves(&self, team_id: &TeamId) -> bool {
        &self.local == team_id || &self.visitante == team_id
    }

    pub fn has_lineup(&self) -> bool {
        self.lineup.values().any(|entries| !entries.is_empty())
    }

    pub fn lineup_entry(&self, team_id: &TeamId, player_id: &PlayerId) -> Option<&LineupEntry> {
        self.lineup
            .get(team_id)?
            .iter()
            .find(|e| &e.player_id == player_id)
    }

    pub fn lineup_entry_mut(
        &mut self,
        team_id: &TeamId,
        player_id: &PlayerId,
    ) -> Option<&mut LineupEntry> {
        self.lineup
            .get_mut(team_id)?
            .iter_mut()
            .find(|e| &e.player_id == player_id)
    }

    /// Lineup entries of a team sorted by batting order (stable on ties).
    pub fn batting_order(&self, team_id: &TeamId) -> Vec<&LineupEntry> {
        let mut entries: Vec<&LineupEntry> = self
            .lineup
            .get(team_id)
            .map(|e| e.iter().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.batting_order);
        entries
    }
}

/// An admin panel account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
    #[serde(default)]
    pub rol: Role,
    #[serde(default)]
    pub equipo: Option<TeamId>,
}

impl User {
    pub fn default_admin() -> Self {
        Self {
            id: UserId::new("admin"),
            nombre: "Administrador".to_string(),
            user: "admin".to_string(),
            pass: "1234".to_string(),
            rol: Role::Admin,
            equipo: None,
        }
    }
}

/// The whole league document: the unit of load and save.
///
/// This is the explicit application state every operation receives by
/// reference. One value lives for one session (one CLI invocation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    #[serde(rename = "equipos", default)]
    pub teams: Vec<Team>,
    #[serde(rename = "jugadores", default)]
    pub players: Vec<Player>,
    #[serde(rename = "partidos", default)]
    pub matches: Vec<Match>,
    #[serde(rename = "usuarios", default)]
    pub users: Vec<User>,
}

impl League {
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    pub fn team_mut(&mut self, id: &TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| &t.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        let name = name.trim().to_lowercase();
        self.teams.iter().find(|t| t.nombre.to_lowercase() == name)
    }

    /// Display name of a team, falling back to its id.
    pub fn team_name(&self, id: &TeamId) -> String {
        self.team(id)
            .map(|t| t.nombre.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Players on a team, in roster order.
    pub fn team_players<'a>(&'a self, team_id: &'a TeamId) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| &p.team_id == team_id)
    }

    pub fn find_match(&self, id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.id == id)
    }

    pub fn find_match_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| &m.id == id)
    }
}

/// Deserializers that accept the loosely typed values found in older documents.
mod lenient {
    use super::*;

    fn value_to_u32(v: &Value) -> Option<u32> {
        match v {
            Value::Number(n) => n
                .as_u64()
                .map(|n| n.min(u32::MAX as u64) as u32)
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u32)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u32),
            Value::Bool(b) => Some(*b as u32),
            _ => None,
        }
    }

    pub fn u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(value_to_u32(&v).unwrap_or(0))
    }

    pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(value_to_u32(&v))
    }

    pub fn rbi<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(value_to_u32(&v).unwrap_or(0).min(MAX_RBI_PER_TURN as u32) as u8)
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(match v {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let s = string(d)?;
        Ok(if s.trim().is_empty() { None } else { Some(s) })
    }

    /// Result codes come as strings or bare numbers. Unknown codes and other
    /// shapes are dropped so one bad cell does not reject the whole document.
    pub fn turn_result<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TurnResult>, D::Error> {
        let v = Value::deserialize(d)?;
        let code = match v {
            Value::Null => return Ok(None),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                tracing::warn!(value = %other, "dropping malformed turn result");
                return Ok(None);
            }
        };
        if code.trim().is_empty() {
            return Ok(None);
        }
        match code.parse::<TurnResult>() {
            Ok(r) => Ok(Some(r)),
            Err(_) => {
                tracing::warn!(code = %code, "dropping unknown turn result");
                Ok(None)
            }
        }
    }
}
