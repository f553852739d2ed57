//! Team and player CRUD.
//!
//! Validation failures return an error and leave the league untouched.
//! Teams are referenced by id everywhere, so renaming a team needs no cascade.

use crate::cli::types::{PlayerEstado, PlayerId, TeamId};
use crate::error::{LeagueError, Result};
use crate::league::models::{League, ManualStanding, Player, SeasonStats, Team};
use chrono::Datelike;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_ESCUDO: &str = "🥎";
pub const DEFAULT_COLOR: &str = "#f5a623";
pub const DEFAULT_SECONDARY_COLOR: &str = "#1a1a2e";
pub const DEFAULT_POSITION: &str = "Utility";

/// Editable team fields. `None` keeps the current value on update.
#[derive(Debug, Clone, Default)]
pub struct TeamDraft {
    pub nombre: Option<String>,
    pub escudo: Option<String>,
    pub color: Option<String>,
    pub imagen: Option<String>,
    pub entrenador: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
}

impl TeamDraft {
    pub fn named(nombre: impl Into<String>) -> Self {
        Self {
            nombre: Some(nombre.into()),
            ..Self::default()
        }
    }
}

/// Editable player fields. `None` keeps the current value on update.
#[derive(Debug, Clone, Default)]
pub struct PlayerDraft {
    pub nombre: Option<String>,
    pub dorsal: Option<u32>,
    pub team_id: Option<TeamId>,
    pub posicion: Option<String>,
    pub estado: Option<PlayerEstado>,
    pub verificado: Option<bool>,
    pub altura: Option<String>,
    pub peso: Option<String>,
    pub edad: Option<String>,
    pub foto: Option<String>,
    pub stats: Option<SeasonStats>,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub players: usize,
    pub habilitados: usize,
    pub suspendidos: usize,
    pub teams: usize,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn short_name(nombre: &str) -> String {
    nombre.split_whitespace().next().unwrap_or_default().to_string()
}

impl League {
    fn ensure_unique_team_name(&self, nombre: &str, except: Option<&TeamId>) -> Result<()> {
        let lower = nombre.to_lowercase();
        let clash = self
            .teams
            .iter()
            .filter(|t| Some(&t.id) != except)
            .any(|t| t.nombre.to_lowercase() == lower);
        if clash {
            return Err(LeagueError::DuplicateTeamName {
                name: nombre.to_string(),
            });
        }
        Ok(())
    }

    fn unused_team_id(&self, nombre: &str) -> TeamId {
        let base = TeamId::from_name(nombre);
        if self.team(&base).is_none() {
            return base;
        }
        (2..)
            .map(|n| TeamId::new(format!("{}-{}", base, n)))
            .find(|id| self.team(id).is_none())
            .unwrap_or(base)
    }

    pub fn add_team(&mut self, draft: TeamDraft) -> Result<TeamId> {
        let nombre = trimmed(draft.nombre).unwrap_or_default();
        if nombre.is_empty() {
            return Err(LeagueError::validation("El nombre del equipo es obligatorio."));
        }
        self.ensure_unique_team_name(&nombre, None)?;

        let id = self.unused_team_id(&nombre);
        let escudo = trimmed(draft.escudo).filter(|e| !e.is_empty());
        let color = trimmed(draft.color).filter(|c| !c.is_empty());
        self.teams.push(Team {
            id: id.clone(),
            nombre_corto: short_name(&nombre),
            nombre,
            color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            color_secundario: DEFAULT_SECONDARY_COLOR.to_string(),
            escudo: escudo.unwrap_or_else(|| DEFAULT_ESCUDO.to_string()),
            imagen: draft.imagen.unwrap_or_default(),
            entrenador: trimmed(draft.entrenador).unwrap_or_default(),
            email: trimmed(draft.email).unwrap_or_default(),
            telefono: trimmed(draft.telefono).unwrap_or_default(),
            manual_stats: ManualStanding::default(),
        });
        info!(team = %id, "team created");
        Ok(id)
    }

    /// Find a team by name, creating it with default colors when missing.
    pub fn ensure_team(&mut self, nombre: &str) -> Result<TeamId> {
        match self.team_by_name(nombre) {
            Some(team) => Ok(team.id.clone()),
            None => self.add_team(TeamDraft::named(nombre)),
        }
    }

    pub fn update_team(&mut self, id: &TeamId, draft: TeamDraft) -> Result<()> {
        if self.team(id).is_none() {
            return Err(LeagueError::TeamNotFound { id: id.to_string() });
        }
        let nombre = trimmed(draft.nombre);
        if let Some(nombre) = &nombre {
            if nombre.is_empty() {
                return Err(LeagueError::validation("El nombre del equipo es obligatorio."));
            }
            self.ensure_unique_team_name(nombre, Some(id))?;
        }

        let Some(team) = self.team_mut(id) else {
            return Err(LeagueError::TeamNotFound { id: id.to_string() });
        };
        if let Some(nombre) = nombre {
            team.nombre_corto = short_name(&nombre);
            team.nombre = nombre;
        }
        if let Some(escudo) = trimmed(draft.escudo) {
            team.escudo = if escudo.is_empty() {
                DEFAULT_ESCUDO.to_string()
            } else {
                escudo
            };
        }
        if let Some(color) = trimmed(draft.color).filter(|c| !c.is_empty()) {
            team.color = color;
        }
        if let Some(imagen) = draft.imagen.filter(|i| !i.is_empty()) {
            team.imagen = imagen;
        }
        if let Some(entrenador) = trimmed(draft.entrenador) {
            team.entrenador = entrenador;
        }
        if let Some(email) = trimmed(draft.email) {
            team.email = email;
        }
        if let Some(telefono) = trimmed(draft.telefono) {
            team.telefono = telefono;
        }
        Ok(())
    }

    /// Delete a team. Without `cascade`, a team that still has players or
    /// matches is refused; with it, those players and matches go too.
    pub fn delete_team(&mut self, id: &TeamId, cascade: bool) -> Result<()> {
        if self.team(id).is_none() {
            return Err(LeagueError::TeamNotFound { id: id.to_string() });
        }
        let has_players = self.team_players(id).next().is_some();
        let has_matches = self.matches.iter().any(|m| m.involves(id));
        if (has_players || has_matches) && !cascade {
            return Err(LeagueError::validation(
                "El equipo tiene jugadores o partidos asociados.",
            ));
        }

        let removed: Vec<PlayerId> = self
            .team_players(id)
            .map(|p| p.id.clone())
            .collect();
        self.players.retain(|p| &p.team_id != id);
        self.matches.retain(|m| !m.involves(id));
        for m in &mut self.matches {
            for player_id in &removed {
                m.player_stats.remove(player_id);
            }
        }
        self.teams.retain(|t| &t.id != id);
        info!(team = %id, players = removed.len(), "team deleted");
        Ok(())
    }

    /// Next sequential player id: one past the highest numeric id, zero padded.
    pub fn next_player_id(&self) -> PlayerId {
        let max = self
            .players
            .iter()
            .filter_map(|p| p.id.sequence())
            .max()
            .unwrap_or(0);
        PlayerId::from_sequence(max + 1)
    }

    pub fn add_player(&mut self, draft: PlayerDraft) -> Result<PlayerId> {
        let nombre = trimmed(draft.nombre).unwrap_or_default();
        if nombre.is_empty() {
            return Err(LeagueError::validation("El nombre del jugador es obligatorio."));
        }
        let Some(team_id) = draft.team_id else {
            return Err(LeagueError::validation("Selecciona un equipo."));
        };
        if self.team(&team_id).is_none() {
            return Err(LeagueError::TeamNotFound {
                id: team_id.to_string(),
            });
        }

        let id = self.next_player_id();
        self.players.push(Player {
            id: id.clone(),
            nombre,
            dorsal: draft.dorsal.unwrap_or(0),
            posicion: trimmed(draft.posicion)
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            team_id,
            foto: draft.foto.unwrap_or_default(),
            estado: draft.estado.unwrap_or_default(),
            verificado: draft.verificado.unwrap_or(false),
            altura: trimmed(draft.altura).unwrap_or_default(),
            peso: trimmed(draft.peso).unwrap_or_default(),
            edad: trimmed(draft.edad).unwrap_or_default(),
            temporada: chrono::Local::now().year().to_string(),
            stats: draft.stats.unwrap_or_default(),
        });
        Ok(id)
    }

    pub fn update_player(&mut self, id: &PlayerId, draft: PlayerDraft) -> Result<()> {
        if let Some(team_id) = &draft.team_id {
            if self.team(team_id).is_none() {
                return Err(LeagueError::TeamNotFound {
                    id: team_id.to_string(),
                });
            }
        }
        let nombre = trimmed(draft.nombre);
        if nombre.as_deref() == Some("") {
            return Err(LeagueError::validation("El nombre del jugador es obligatorio."));
        }

        let Some(player) = self.player_mut(id) else {
            return Err(LeagueError::PlayerNotFound { id: id.to_string() });
        };
        if let Some(nombre) = nombre {
            player.nombre = nombre;
        }
        if let Some(dorsal) = draft.dorsal {
            player.dorsal = dorsal;
        }
        if let Some(team_id) = draft.team_id {
            player.team_id = team_id;
        }
        if let Some(posicion) = trimmed(draft.posicion) {
            player.posicion = posicion;
        }
        if let Some(estado) = draft.estado {
            player.estado = estado;
        }
        if let Some(verificado) = draft.verificado {
            player.verificado = verificado;
        }
        if let Some(altura) = trimmed(draft.altura) {
            player.altura = altura;
        }
        if let Some(peso) = trimmed(draft.peso) {
            player.peso = peso;
        }
        if let Some(edad) = trimmed(draft.edad) {
            player.edad = edad;
        }
        if let Some(foto) = draft.foto.filter(|f| !f.is_empty()) {
            player.foto = foto;
        }
        if let Some(stats) = draft.stats {
            player.stats = stats;
        }
        Ok(())
    }

    /// Flip habilitado/suspendido. Unknown ids are ignored.
    pub fn toggle_estado(&mut self, id: &PlayerId) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.estado = p.estado.toggled();
                true
            }
            None => false,
        }
    }

    /// Flip the approval flag. Unknown ids are ignored.
    pub fn toggle_verificado(&mut self, id: &PlayerId) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.verificado = !p.verificado;
                true
            }
            None => false,
        }
    }

    /// Remove a player along with their lineup entries and box-score lines.
    pub fn delete_player(&mut self, id: &PlayerId) -> Result<()> {
        let before = self.players.len();
        self.players.retain(|p| &p.id != id);
        if self.players.len() == before {
            return Err(LeagueError::PlayerNotFound { id: id.to_string() });
        }
        for m in &mut self.matches {
            m.player_stats.remove(id);
            for entries in m.lineup.values_mut() {
                entries.retain(|e| &e.player_id != id);
            }
        }
        Ok(())
    }

    pub fn roster_summary(&self) -> RosterSummary {
        let habilitados = self
            .players
            .iter()
            .filter(|p| p.estado == PlayerEstado::Habilitado)
            .count();
        RosterSummary {
            players: self.players.len(),
            habilitados,
            suspendidos: self.players.len() - habilitados,
            teams: self.teams.len(),
        }
    }
}

#[cfg(test)]
mod tests;
