//! Semicolon-separated roster and box-score files.
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet apps pick up
//! the encoding. The mark is optional on import.

use crate::cli::types::{MatchId, PlayerEstado, PlayerId, TeamId};
use crate::error::{LeagueError, Result};
use crate::league::models::{BoxLine, League, SeasonStats};
use crate::league::roster::{PlayerDraft, DEFAULT_POSITION};
use std::io::{Read, Write};
use tracing::{debug, info};

const BOM: &str = "\u{feff}";

pub const ROSTER_HEADERS: [&str; 14] = [
    "Nombre", "Dorsal", "Equipo", "Posicion", "Estado", "Altura", "Peso", "Edad", "AVG", "HR",
    "RBI", "H", "AB", "R",
];

pub const BOX_HEADERS: [&str; 8] = ["JugadorID", "Nombre", "Equipo", "AB", "H", "HR", "RBI", "R"];

const ROSTER_EXAMPLE: [&str; 14] = [
    "Carlos Mendoza",
    "7",
    "Tigres de Vallecas",
    "Pitcher",
    "habilitado",
    "1.80",
    "85",
    "42",
    ".320",
    "5",
    "12",
    "24",
    "75",
    "10",
];

/// One parsed roster line.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub nombre: String,
    pub dorsal: u32,
    pub equipo: String,
    pub posicion: String,
    pub estado: PlayerEstado,
    pub altura: String,
    pub peso: String,
    pub edad: String,
    pub stats: SeasonStats,
}

/// One parsed box-score line.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRow {
    pub player_id: PlayerId,
    pub line: BoxLine,
}

/// Leading integer of a field, `0` when there is none (`"7b"` → 7).
fn leading_int(raw: &str) -> u32 {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn read_records<R: Read>(mut reader: R) -> Result<Vec<Vec<String>>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        records.push(fields);
    }
    Ok(records)
}

/// Drop the first record when it looks like a header row.
fn skip_header(mut records: Vec<Vec<String>>, marker: &str) -> Vec<Vec<String>> {
    let is_header = records
        .first()
        .is_some_and(|first| first.join(";").to_lowercase().contains(marker));
    if is_header {
        records.remove(0);
    }
    records
}

fn field(fields: &[String], idx: usize) -> &str {
    fields.get(idx).map(String::as_str).unwrap_or("")
}

fn writer<W: Write>(mut out: W) -> Result<csv::Writer<W>> {
    out.write_all(BOM.as_bytes())?;
    Ok(csv::WriterBuilder::new().delimiter(b';').from_writer(out))
}

/// Parse a roster file. Rows with fewer than three fields are skipped.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let records = skip_header(read_records(reader)?, "nombre");
    let mut rows = Vec::new();
    for fields in records {
        if fields.len() < 3 {
            debug!(?fields, "skipping short roster row");
            continue;
        }
        let posicion = field(&fields, 3);
        rows.push(RosterRow {
            nombre: field(&fields, 0).to_string(),
            dorsal: leading_int(field(&fields, 1)),
            equipo: field(&fields, 2).to_string(),
            posicion: if posicion.is_empty() {
                DEFAULT_POSITION.to_string()
            } else {
                posicion.to_string()
            },
            estado: PlayerEstado::from_csv(field(&fields, 4)),
            altura: field(&fields, 5).to_string(),
            peso: field(&fields, 6).to_string(),
            edad: field(&fields, 7).to_string(),
            stats: SeasonStats {
                avg: field(&fields, 8).to_string(),
                hr: leading_int(field(&fields, 9)),
                rbi: leading_int(field(&fields, 10)),
                h: leading_int(field(&fields, 11)),
                ab: leading_int(field(&fields, 12)),
                r: leading_int(field(&fields, 13)),
                ..SeasonStats::default()
            },
        });
    }
    Ok(rows)
}

/// Write the roster of one team, or of the whole league when `team` is `None`.
/// Returns the number of players written.
pub fn write_roster_csv<W: Write>(league: &League, team: Option<&TeamId>, out: W) -> Result<usize> {
    let mut wtr = writer(out)?;
    wtr.write_record(ROSTER_HEADERS)?;
    let mut written = 0;
    for p in league
        .players
        .iter()
        .filter(|p| team.map_or(true, |t| &p.team_id == t))
    {
        let s = &p.stats;
        wtr.write_record([
            p.nombre.clone(),
            p.dorsal.to_string(),
            league.team_name(&p.team_id),
            p.posicion.clone(),
            p.estado.to_string(),
            p.altura.clone(),
            p.peso.clone(),
            p.edad.clone(),
            s.avg.clone(),
            s.hr.to_string(),
            s.rbi.to_string(),
            s.h.to_string(),
            s.ab.to_string(),
            s.r.to_string(),
        ])?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

/// Header plus one example row.
pub fn write_roster_template<W: Write>(out: W) -> Result<()> {
    let mut wtr = writer(out)?;
    wtr.write_record(ROSTER_HEADERS)?;
    wtr.write_record(ROSTER_EXAMPLE)?;
    wtr.flush()?;
    Ok(())
}

/// Box-score sheet for a match: both rosters with their current lines.
pub fn write_box_template<W: Write>(league: &League, match_id: &MatchId, out: W) -> Result<usize> {
    let m = league
        .find_match(match_id)
        .ok_or_else(|| LeagueError::MatchNotFound {
            id: match_id.to_string(),
        })?;
    let mut wtr = writer(out)?;
    wtr.write_record(BOX_HEADERS)?;
    let mut written = 0;
    for team_id in [&m.local, &m.visitante] {
        let team_name = league.team_name(team_id);
        for p in league.team_players(team_id) {
            let line = m.player_stats.get(&p.id).copied().unwrap_or_default();
            wtr.write_record([
                p.id.to_string(),
                p.nombre.clone(),
                team_name.clone(),
                line.ab.to_string(),
                line.h.to_string(),
                line.hr.to_string(),
                line.rbi.to_string(),
                line.r.to_string(),
            ])?;
            written += 1;
        }
    }
    wtr.flush()?;
    Ok(written)
}

/// Parse a box-score sheet. Rows without a player id are skipped.
pub fn parse_box_csv<R: Read>(reader: R) -> Result<Vec<BoxRow>> {
    let records = skip_header(read_records(reader)?, "jugadorid");
    Ok(records
        .into_iter()
        .filter(|fields| !field(fields, 0).is_empty())
        .map(|fields| BoxRow {
            player_id: PlayerId::new(field(&fields, 0)),
            line: BoxLine {
                ab: leading_int(field(&fields, 3)),
                h: leading_int(field(&fields, 4)),
                hr: leading_int(field(&fields, 5)),
                rbi: leading_int(field(&fields, 6)),
                r: leading_int(field(&fields, 7)),
            },
        })
        .collect())
}

impl League {
    /// Add every parsed row as a new, unapproved player. Unknown team names
    /// create teams with default colors.
    pub fn import_roster(&mut self, rows: Vec<RosterRow>) -> Result<Vec<PlayerId>> {
        let mut imported = Vec::with_capacity(rows.len());
        for row in rows {
            if row.equipo.is_empty() {
                debug!(nombre = %row.nombre, "skipping roster row without team");
                continue;
            }
            let team_id = self.ensure_team(&row.equipo)?;
            let id = self.add_player(PlayerDraft {
                nombre: Some(row.nombre),
                dorsal: Some(row.dorsal),
                team_id: Some(team_id),
                posicion: Some(row.posicion),
                estado: Some(row.estado),
                verificado: Some(false),
                altura: Some(row.altura),
                peso: Some(row.peso),
                edad: Some(row.edad),
                foto: None,
                stats: Some(row.stats),
            })?;
            imported.push(id);
        }
        info!(count = imported.len(), "roster imported");
        Ok(imported)
    }

    /// Write box-score lines for known players of either team, then
    /// recompute the match score. Returns how many lines were applied.
    pub fn import_box_score(&mut self, match_id: &MatchId, rows: Vec<BoxRow>) -> Result<usize> {
        if self.find_match(match_id).is_none() {
            return Err(LeagueError::MatchNotFound {
                id: match_id.to_string(),
            });
        }
        let mut applied = 0;
        for row in rows {
            match self.set_box_line(match_id, &row.player_id, row.line) {
                Ok(()) => applied += 1,
                Err(err) => debug!(player_id = %row.player_id, %err, "box-score row skipped"),
            }
        }
        self.sync_lineup_to_player_stats(match_id);
        info!(%match_id, applied, "box score imported");
        Ok(applied)
    }
}

#[cfg(test)]
mod tests;
