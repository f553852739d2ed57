//! Match calendar: scheduling, lifecycle, notes, audit log and messages.

use crate::cli::types::{MatchId, MatchStatus, PlayerId, TeamId};
use crate::error::{LeagueError, Result};
use crate::league::models::{BoxLine, ChangeLogEntry, League, Match, Message};
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::info;

const MESES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Fields needed to schedule a match.
#[derive(Debug, Clone)]
pub struct MatchDraft {
    pub local: TeamId,
    pub visitante: TeamId,
    pub fecha: NaiveDate,
    pub hora: String,
    pub campo: String,
    pub jornada: Option<String>,
    pub arbitro: String,
}

/// Matches of one calendar month, in date order.
#[derive(Debug, Clone)]
pub struct MonthGroup<'a> {
    pub label: String,
    pub matches: Vec<&'a Match>,
}

/// Spanish month label for an ISO date, e.g. `"Mayo 2025"`.
pub fn month_label(fecha: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(fecha, "%Y-%m-%d").ok()?;
    Some(format!("{} {}", MESES[date.month0() as usize], date.year()))
}

impl League {
    fn unused_match_id(&self) -> MatchId {
        let mut millis = Utc::now().timestamp_millis().max(0) as u128;
        loop {
            let id = MatchId::from_millis(millis);
            if self.find_match(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    fn match_or_err(&mut self, id: &MatchId) -> Result<&mut Match> {
        self.find_match_mut(id)
            .ok_or_else(|| LeagueError::MatchNotFound { id: id.to_string() })
    }

    pub fn add_match(&mut self, draft: MatchDraft) -> Result<MatchId> {
        if draft.local == draft.visitante {
            return Err(LeagueError::validation("Elige dos equipos diferentes."));
        }
        for team_id in [&draft.local, &draft.visitante] {
            if self.team(team_id).is_none() {
                return Err(LeagueError::TeamNotFound {
                    id: team_id.to_string(),
                });
            }
        }

        let id = self.unused_match_id();
        self.matches.push(Match {
            id: id.clone(),
            fecha: draft.fecha.format("%Y-%m-%d").to_string(),
            hora: draft.hora.trim().to_string(),
            campo: draft.campo.trim().to_string(),
            jornada: draft.jornada.filter(|j| !j.trim().is_empty()),
            arbitro: draft.arbitro.trim().to_string(),
            local: draft.local,
            visitante: draft.visitante,
            status: MatchStatus::Scheduled,
            bitacora: String::new(),
            change_log: Vec::new(),
            messages: Vec::new(),
            local_score: 0,
            visit_score: 0,
            player_stats: BTreeMap::new(),
            lineup: BTreeMap::new(),
        });
        info!(match_id = %id, "match scheduled");
        Ok(id)
    }

    pub fn delete_match(&mut self, id: &MatchId) -> Result<()> {
        let before = self.matches.len();
        self.matches.retain(|m| &m.id != id);
        if self.matches.len() == before {
            return Err(LeagueError::MatchNotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Matches sorted by date (ISO strings compare chronologically).
    pub fn calendar(&self) -> Vec<&Match> {
        let mut sorted: Vec<&Match> = self.matches.iter().collect();
        sorted.sort_by(|a, b| a.fecha.cmp(&b.fecha));
        sorted
    }

    /// Calendar grouped by month. Undated matches land in a trailing
    /// "Sin fecha" group.
    pub fn calendar_by_month(&self) -> Vec<MonthGroup<'_>> {
        let mut groups: Vec<MonthGroup<'_>> = Vec::new();
        let mut undated = Vec::new();
        for m in self.calendar() {
            let Some(label) = month_label(&m.fecha) else {
                undated.push(m);
                continue;
            };
            match groups.last_mut() {
                Some(group) if group.label == label => group.matches.push(m),
                _ => groups.push(MonthGroup {
                    label,
                    matches: vec![m],
                }),
            }
        }
        if !undated.is_empty() {
            groups.push(MonthGroup {
                label: "Sin fecha".to_string(),
                matches: undated,
            });
        }
        groups
    }

    pub fn set_match_status(&mut self, id: &MatchId, status: MatchStatus) -> Result<()> {
        self.match_or_err(id)?.status = status;
        Ok(())
    }

    /// Replace the free-text match notes (bitácora).
    pub fn set_match_notes(&mut self, id: &MatchId, text: &str) -> Result<()> {
        self.match_or_err(id)?.bitacora = text.to_string();
        Ok(())
    }

    /// Append an audit entry. Entries are never edited or removed.
    pub fn log_change(&mut self, id: &MatchId, user: &str, action: impl Into<String>) -> Result<()> {
        self.match_or_err(id)?.change_log.push(ChangeLogEntry {
            at: Utc::now(),
            user: user.to_string(),
            action: action.into(),
        });
        Ok(())
    }

    pub fn post_message(&mut self, id: &MatchId, user: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LeagueError::validation("El mensaje está vacío."));
        }
        self.match_or_err(id)?.messages.push(Message {
            at: Utc::now(),
            user: user.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Direct box-score entry for a player of either team.
    ///
    /// Lines for players who also have a lineup entry are overwritten by the
    /// next sync.
    pub fn set_box_line(&mut self, id: &MatchId, player_id: &PlayerId, line: BoxLine) -> Result<()> {
        let team_id = self
            .player(player_id)
            .map(|p| p.team_id.clone())
            .ok_or_else(|| LeagueError::PlayerNotFound {
                id: player_id.to_string(),
            })?;
        let m = self.match_or_err(id)?;
        if !m.involves(&team_id) {
            return Err(LeagueError::validation(format!(
                "El jugador {} no pertenece a ninguno de los equipos del partido.",
                player_id
            )));
        }
        m.player_stats.insert(player_id.clone(), line);
        Ok(())
    }
}
