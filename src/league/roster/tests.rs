//! Unit tests for team and player CRUD

use super::*;
use crate::league::models::BoxLine;
use crate::league::testing::{add_test_match, create_test_league};

#[test]
fn test_add_team_defaults_and_slug() {
    let mut league = League::default();
    let id = league.add_team(TeamDraft::named("  Los Tigres ")).unwrap();

    assert_eq!(id.as_str(), "los-tigres");
    let team = league.team(&id).unwrap();
    assert_eq!(team.nombre, "Los Tigres");
    assert_eq!(team.nombre_corto, "Los");
    assert_eq!(team.escudo, DEFAULT_ESCUDO);
    assert_eq!(team.color, DEFAULT_COLOR);
    assert!(team.manual_stats.is_empty());
}

#[test]
fn test_add_team_rejects_empty_and_duplicate_names() {
    let mut league = League::default();
    league.add_team(TeamDraft::named("Tigres")).unwrap();

    assert!(matches!(
        league.add_team(TeamDraft::named("   ")),
        Err(LeagueError::Validation { .. })
    ));
    assert!(matches!(
        league.add_team(TeamDraft::named("TIGRES")),
        Err(LeagueError::DuplicateTeamName { .. })
    ));
    assert_eq!(league.teams.len(), 1);
}

#[test]
fn test_rename_keeps_id_and_references() {
    let mut fx = create_test_league();
    fx.league
        .update_team(&fx.tigres, TeamDraft::named("Tigres del Norte"))
        .unwrap();

    assert_eq!(fx.league.team_name(&fx.tigres), "Tigres del Norte");
    assert_eq!(fx.league.team_players(&fx.tigres).count(), 3);
    assert_eq!(fx.league.find_match(&fx.game).unwrap().local, fx.tigres);

    // A new team with the old name gets a distinct id
    let again = fx.league.add_team(TeamDraft::named("Tigres")).unwrap();
    assert_ne!(again, fx.tigres);
    assert_eq!(again.as_str(), "tigres-2");
}

#[test]
fn test_rename_to_existing_name_fails() {
    let mut fx = create_test_league();
    let err = fx
        .league
        .update_team(&fx.tigres, TeamDraft::named("leones"))
        .unwrap_err();
    assert!(matches!(err, LeagueError::DuplicateTeamName { .. }));
    assert_eq!(fx.league.team_name(&fx.tigres), "Tigres");

    // Renaming to its own name with different case is allowed
    fx.league
        .update_team(&fx.tigres, TeamDraft::named("TIGRES"))
        .unwrap();
}

#[test]
fn test_delete_team_without_cascade_is_refused() {
    let mut fx = create_test_league();
    let before = fx.league.clone();
    assert!(fx.league.delete_team(&fx.tigres, false).is_err());
    assert_eq!(fx.league, before);
}

#[test]
fn test_delete_team_cascade() {
    let mut fx = create_test_league();
    fx.league
        .set_box_line(&fx.game, &fx.l1, BoxLine { ab: 3, h: 1, ..BoxLine::default() })
        .unwrap();
    let other = fx.league.add_team(TeamDraft::named("Halcones")).unwrap();
    let kept = add_test_match(&mut fx.league, &other, &fx.leones, 3);

    fx.league.delete_team(&fx.tigres, true).unwrap();

    assert!(fx.league.team(&fx.tigres).is_none());
    assert_eq!(fx.league.players.len(), 2);
    assert!(fx.league.find_match(&fx.game).is_none());
    assert!(fx.league.find_match(&kept).is_some());
}

#[test]
fn test_delete_empty_team() {
    let mut league = League::default();
    let id = league.add_team(TeamDraft::named("Vacío")).unwrap();
    league.delete_team(&id, false).unwrap();
    assert!(league.teams.is_empty());
    assert!(matches!(
        league.delete_team(&id, false),
        Err(LeagueError::TeamNotFound { .. })
    ));
}

#[test]
fn test_player_ids_are_sequential() {
    let fx = create_test_league();
    assert_eq!(fx.t1.as_str(), "001");
    assert_eq!(fx.l2.as_str(), "005");
    assert_eq!(fx.league.next_player_id().as_str(), "006");
}

#[test]
fn test_add_player_requires_team() {
    let mut fx = create_test_league();
    let err = fx
        .league
        .add_player(PlayerDraft {
            nombre: Some("Sin Equipo".to_string()),
            ..PlayerDraft::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Selecciona un equipo.");

    let err = fx
        .league
        .add_player(PlayerDraft {
            nombre: Some("Fantasma".to_string()),
            team_id: Some(TeamId::new("ghost")),
            ..PlayerDraft::default()
        })
        .unwrap_err();
    assert!(matches!(err, LeagueError::TeamNotFound { .. }));
}

#[test]
fn test_add_player_defaults() {
    let mut fx = create_test_league();
    let id = fx
        .league
        .add_player(PlayerDraft {
            nombre: Some("Nuevo".to_string()),
            team_id: Some(fx.leones.clone()),
            ..PlayerDraft::default()
        })
        .unwrap();
    let player = fx.league.player(&id).unwrap();
    assert_eq!(player.posicion, DEFAULT_POSITION);
    assert_eq!(player.estado, PlayerEstado::Habilitado);
    assert!(!player.verificado);
    assert_eq!(player.temporada.len(), 4);
}

#[test]
fn test_update_player_moves_team() {
    let mut fx = create_test_league();
    fx.league
        .update_player(
            &fx.t2,
            PlayerDraft {
                team_id: Some(fx.leones.clone()),
                dorsal: Some(23),
                ..PlayerDraft::default()
            },
        )
        .unwrap();
    let player = fx.league.player(&fx.t2).unwrap();
    assert_eq!(player.team_id, fx.leones);
    assert_eq!(player.dorsal, 23);
    assert_eq!(player.nombre, "Luis Ortega");
}

#[test]
fn test_toggles() {
    let mut fx = create_test_league();
    assert!(fx.league.toggle_estado(&fx.t1));
    assert_eq!(fx.league.player(&fx.t1).unwrap().estado, PlayerEstado::Suspendido);
    assert!(fx.league.toggle_verificado(&fx.t3));
    assert!(fx.league.player(&fx.t3).unwrap().verificado);
    assert!(!fx.league.toggle_estado(&PlayerId::new("999")));

    let summary = fx.league.roster_summary();
    assert_eq!(summary.players, 5);
    assert_eq!(summary.suspendidos, 1);
    assert_eq!(summary.habilitados, 4);
    assert_eq!(summary.teams, 2);
}

#[test]
fn test_delete_player_clears_match_data() {
    let mut fx = create_test_league();
    fx.league.init_lineup(&fx.game, &fx.tigres);
    fx.league
        .set_box_line(&fx.game, &fx.t1, BoxLine { r: 2, ..BoxLine::default() })
        .unwrap();

    fx.league.delete_player(&fx.t1).unwrap();

    let m = fx.league.find_match(&fx.game).unwrap();
    assert!(m.player_stats.get(&fx.t1).is_none());
    assert!(m.lineup_entry(&fx.tigres, &fx.t1).is_none());
    assert!(fx.league.delete_player(&fx.t1).is_err());
}
