//! One-time upgrade of older league documents
//!
//! Older documents referenced teams by display name (`equipo` on players,
//! `local`/`visitante` on matches, lineup keys) and stored a lineup entry's
//! status as a `starter` boolean. Loading rewrites those shapes to team ids
//! and statuses, creates teams that were only ever named, and makes sure an
//! admin account exists.

use crate::cli::types::{LineupStatus, PlayerId, TeamId};
use crate::league::models::League;
use crate::league::roster::TeamDraft;
use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Whether a raw document carries a roster at all.
pub fn has_roster(doc: &Value) -> bool {
    doc.get("jugadores").is_some_and(Value::is_array) || doc.is_array()
}

/// Team lookup by id or display name, remembering names it had to invent ids for.
#[derive(Default)]
struct TeamIndex {
    ids: HashSet<String>,
    by_name: HashMap<String, String>,
    created: Vec<(String, String)>,
}

impl TeamIndex {
    fn insert(&mut self, id: &str, nombre: &str) {
        self.ids.insert(id.to_string());
        self.by_name
            .entry(nombre.trim().to_lowercase())
            .or_insert_with(|| id.to_string());
    }

    fn fresh_id(&self, nombre: &str) -> String {
        let base = TeamId::from_name(nombre).to_string();
        if !self.ids.contains(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|id| !self.ids.contains(id))
            .unwrap_or(base)
    }

    /// Id for a reference that may be an id or a legacy display name.
    fn resolve(&mut self, reference: &str) -> String {
        let reference = reference.trim();
        if self.ids.contains(reference) {
            return reference.to_string();
        }
        if let Some(id) = self.by_name.get(&reference.to_lowercase()) {
            return id.clone();
        }
        let id = self.fresh_id(reference);
        self.insert(&id, reference);
        self.created.push((id.clone(), reference.to_string()));
        id
    }
}

/// Numeric ids from older documents become strings.
fn stringify_id(value: &mut Value) {
    if let Value::Number(n) = value {
        *value = Value::String(n.to_string());
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// Replace a legacy name field with an id field, unless the id is already there.
fn migrate_team_ref(obj: &mut Map<String, Value>, legacy: &str, key: &str, teams: &mut TeamIndex) {
    let legacy_value = obj.remove(legacy);
    if str_field(obj, key).is_some() {
        return;
    }
    if let Some(name) = legacy_value.as_ref().and_then(Value::as_str) {
        let id = teams.resolve(name);
        obj.insert(key.to_string(), Value::String(id));
    }
}

fn migrate_teams(root: &mut Map<String, Value>, teams: &mut TeamIndex) {
    let Some(Value::Array(list)) = root.get_mut("equipos") else {
        return;
    };
    for team in list.iter_mut().filter_map(Value::as_object_mut) {
        let nombre = str_field(team, "nombre").unwrap_or_default().to_string();
        match team.get_mut("id") {
            Some(id @ Value::Number(_)) => stringify_id(id),
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            _ => {
                let id = teams.fresh_id(&nombre);
                team.insert("id".to_string(), Value::String(id));
            }
        }
        if let Some(id) = str_field(team, "id") {
            let id = id.to_string();
            teams.insert(&id, &nombre);
        }
    }
}

fn migrate_players(root: &mut Map<String, Value>, teams: &mut TeamIndex) {
    let Some(Value::Array(list)) = root.get_mut("jugadores") else {
        return;
    };
    let mut next = list
        .iter()
        .filter_map(|p| match p.get("id")? {
            Value::String(s) => s.parse::<u32>().ok(),
            Value::Number(n) => n.as_u64().map(|n| n as u32),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    for player in list.iter_mut().filter_map(Value::as_object_mut) {
        match player.get_mut("id") {
            Some(id @ Value::Number(_)) => stringify_id(id),
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            _ => {
                next += 1;
                let id = PlayerId::from_sequence(next).to_string();
                player.insert("id".to_string(), Value::String(id));
            }
        }
        migrate_team_ref(player, "equipo", "equipoId", teams);
        player
            .entry("equipoId")
            .or_insert_with(|| Value::String(String::new()));
        if player.get("stats").map_or(true, Value::is_null) {
            player.insert("stats".to_string(), json!({}));
        }
    }
}

fn migrate_lineup_entry(entry: &mut Value) {
    let Some(obj) = entry.as_object_mut() else {
        return;
    };
    if let Some(id) = obj.get_mut("playerId") {
        stringify_id(id);
    }
    let starter = obj.remove("starter");
    if obj.contains_key("status") {
        return;
    }
    let starter = starter.as_ref().and_then(Value::as_bool).unwrap_or(false);
    let status = LineupStatus::from_starter_flag(starter);
    obj.insert("status".to_string(), json!(status));
}

fn migrate_matches(root: &mut Map<String, Value>, teams: &mut TeamIndex) {
    let Some(Value::Array(list)) = root.get_mut("partidos") else {
        return;
    };
    for (index, m) in list.iter_mut().enumerate() {
        let Some(obj) = m.as_object_mut() else {
            continue;
        };
        match obj.get_mut("id") {
            Some(id @ Value::Number(_)) => stringify_id(id),
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            _ => {
                obj.insert("id".to_string(), Value::String(format!("p{}", index)));
            }
        }
        migrate_team_ref(obj, "local", "localId", teams);
        migrate_team_ref(obj, "visitante", "visitanteId", teams);

        if let Some(Value::Object(stats)) = obj.get("playerStats") {
            if stats.values().any(|v| !v.is_object()) {
                obj.insert("playerStats".to_string(), json!({}));
            }
        }

        if let Some(Value::Object(lineup)) = obj.remove("lineup") {
            let mut migrated = Map::new();
            for (key, mut entries) in lineup {
                if let Value::Array(list) = &mut entries {
                    list.iter_mut().for_each(migrate_lineup_entry);
                }
                migrated.insert(teams.resolve(&key), entries);
            }
            obj.insert("lineup".to_string(), Value::Object(migrated));
        }
    }
}

/// Upgrade a raw document and deserialize it.
///
/// A bare array is taken as a list of players.
pub fn league_from_document(doc: Value) -> Result<League> {
    let mut doc = match doc {
        Value::Array(players) => json!({ "jugadores": players }),
        Value::Object(_) => doc,
        other => bail!("league document is not an object: {}", other),
    };
    let Some(root) = doc.as_object_mut() else {
        bail!("league document is not an object");
    };

    let mut teams = TeamIndex::default();
    migrate_teams(root, &mut teams);
    migrate_players(root, &mut teams);
    migrate_matches(root, &mut teams);
    let created = std::mem::take(&mut teams.created);

    let mut league: League =
        serde_json::from_value(doc).context("league document does not match the expected shape")?;

    for (id, nombre) in created {
        let team_id = TeamId::new(id);
        if league.team(&team_id).is_some() {
            continue;
        }
        match league.add_team(TeamDraft::named(nombre.as_str())) {
            Ok(new_id) if new_id == team_id => debug!(team = %new_id, "team created from legacy name"),
            Ok(new_id) => debug!(expected = %team_id, team = %new_id, "legacy team got a different id"),
            Err(err) => debug!(%nombre, %err, "legacy team not created"),
        }
    }
    league.ensure_default_admin();
    info!(
        teams = league.teams.len(),
        players = league.players.len(),
        matches = league.matches.len(),
        "league document loaded"
    );
    Ok(league)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{MatchId, Role};

    #[test]
    fn test_bare_player_array() {
        let doc = json!([
            {"id": "001", "nombre": "Carlos", "equipo": "Tigres de Vallecas", "dorsal": "7"},
            {"id": 2, "nombre": "Luis", "equipo": "Tigres de Vallecas"}
        ]);
        assert!(has_roster(&doc));

        let league = league_from_document(doc).unwrap();
        assert_eq!(league.teams.len(), 1);
        let team = &league.teams[0];
        assert_eq!(team.id.as_str(), "tigres-de-vallecas");
        assert_eq!(team.nombre, "Tigres de Vallecas");
        assert!(league.players.iter().all(|p| p.team_id == team.id));
        assert_eq!(league.players[1].id.as_str(), "2");
        assert_eq!(league.players[0].dorsal, 7);
        assert_eq!(league.users[0].rol, Role::Admin);
    }

    #[test]
    fn test_match_names_become_ids() {
        let doc = json!({
            "equipos": [
                {"id": "tig", "nombre": "Tigres"},
                {"nombre": "Los Leones"}
            ],
            "jugadores": [
                {"id": "001", "nombre": "Carlos", "equipo": "Tigres"}
            ],
            "partidos": [{
                "id": "p1",
                "fecha": "2025-05-10",
                "local": "Tigres",
                "visitante": "Los Leones",
                "lineup": {
                    "Tigres": [
                        {"playerId": "001", "order": 1, "starter": true},
                        {"playerId": 5, "order": 2}
                    ]
                }
            }],
            "usuarios": [{"id": "u1", "nombre": "Ana", "user": "ana", "pass": "x", "rol": "anotador"}]
        });

        let league = league_from_document(doc).unwrap();
        let m = league.find_match(&MatchId::new("p1")).unwrap();
        assert_eq!(m.local, TeamId::new("tig"));
        assert_eq!(m.visitante, TeamId::new("los-leones"));

        let entries = &m.lineup[&TeamId::new("tig")];
        assert_eq!(entries[0].status, LineupStatus::Titular);
        assert_eq!(entries[1].status, LineupStatus::Suplente);
        assert_eq!(entries[1].player_id.as_str(), "5");

        assert_eq!(league.players[0].team_id, TeamId::new("tig"));
        assert_eq!(league.users.len(), 2);
        assert!(league.authenticate("admin", "1234").is_ok());
    }

    #[test]
    fn test_current_shape_is_unchanged() {
        let mut league = League::default();
        league.add_team(TeamDraft::named("Tigres")).unwrap();
        league.ensure_default_admin();
        let doc = serde_json::to_value(&league).unwrap();

        assert_eq!(league_from_document(doc).unwrap(), league);
    }

    #[test]
    fn test_players_without_ids_get_sequence() {
        let doc = json!({"jugadores": [
            {"id": "004", "nombre": "A", "equipoId": "x"},
            {"nombre": "B", "equipoId": "x"}
        ]});
        let league = league_from_document(doc).unwrap();
        assert_eq!(league.players[1].id.as_str(), "005");
    }

    #[test]
    fn test_sparse_records_still_load() {
        let doc = json!({
            "jugadores": [{"id": "001", "equipo": "Tigres"}],
            "partidos": [{
                "id": "p1",
                "fecha": "2025-05-10",
                "local": "Tigres",
                "visitante": "Leones",
                "lineup": {
                    "Tigres": [{"playerId": "001", "order": 1, "turns": [{"result": 7}, {"result": "HR"}]}]
                }
            }]
        });
        assert!(has_roster(&doc));

        let league = league_from_document(doc).unwrap();
        assert_eq!(league.players[0].nombre, "");
        assert_eq!(league.players[0].team_id, TeamId::new("tigres"));

        let m = league.find_match(&MatchId::new("p1")).unwrap();
        let turns = &m.lineup[&TeamId::new("tigres")][0].turns;
        assert_eq!(turns[0].result, None);
        assert_eq!(turns[1].result, Some(crate::cli::types::TurnResult::HomeRun));
    }

    #[test]
    fn test_rejects_scalars() {
        assert!(league_from_document(json!("nope")).is_err());
        assert!(!has_roster(&json!({"equipos": []})));
    }
}
