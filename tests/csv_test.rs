//! Roster and box-score files moved between leagues through disk

use std::fs::File;
use std::io::BufReader;

use softball_league::{
    csv_io::{parse_box_csv, parse_roster_csv, write_box_template, write_roster_csv, write_roster_template},
    league::{League, MatchDraft, PlayerDraft, TeamDraft},
    PlayerEstado,
};
use tempfile::tempdir;

fn league_with_roster() -> League {
    let mut league = League::default();
    let tigres = league.add_team(TeamDraft::named("Tigres")).unwrap();
    let leones = league.add_team(TeamDraft::named("Leones")).unwrap();
    for (nombre, team, dorsal) in [
        ("Carlos Mendoza", &tigres, 7),
        ("Luis Ortega", &tigres, 12),
        ("Jorge Ruiz", &leones, 3),
    ] {
        league
            .add_player(PlayerDraft {
                nombre: Some(nombre.to_string()),
                team_id: Some(team.clone()),
                dorsal: Some(dorsal),
                verificado: Some(true),
                ..PlayerDraft::default()
            })
            .unwrap();
    }
    league
}

#[test]
fn test_team_export_imports_into_new_league() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tigres.csv");
    let source = league_with_roster();
    let tigres = source.teams[0].id.clone();

    let written = write_roster_csv(&source, Some(&tigres), File::create(&path).unwrap()).unwrap();
    assert_eq!(written, 2);

    let rows = parse_roster_csv(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(rows.len(), 2);

    let mut target = League::default();
    let ids = target.import_roster(rows).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(target.teams.len(), 1);
    assert_eq!(target.teams[0].nombre, "Tigres");

    let carlos = target.player(&ids[0]).unwrap();
    assert_eq!(carlos.nombre, "Carlos Mendoza");
    assert_eq!(carlos.dorsal, 7);
    assert_eq!(carlos.estado, PlayerEstado::Habilitado);
    // Imported players wait for approval
    assert!(!carlos.verificado);
}

#[test]
fn test_template_row_is_importable() {
    let mut buf = Vec::new();
    write_roster_template(&mut buf).unwrap();

    let rows = parse_roster_csv(buf.as_slice()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].nombre, "Carlos Mendoza");
    assert_eq!(rows[0].equipo, "Tigres de Vallecas");
}

#[test]
fn test_filled_box_sheet_updates_match() {
    let mut league = league_with_roster();
    let (tigres, leones) = (league.teams[0].id.clone(), league.teams[1].id.clone());
    let game = league
        .add_match(MatchDraft {
            local: tigres,
            visitante: leones,
            fecha: chrono::NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            hora: String::new(),
            campo: String::new(),
            jornada: None,
            arbitro: String::new(),
        })
        .unwrap();

    let mut sheet = Vec::new();
    assert_eq!(write_box_template(&league, &game, &mut sheet).unwrap(), 3);
    let sheet = String::from_utf8(sheet).unwrap();

    // Fill in the sheet the way a scorer would: Carlos 2-for-3 with a run
    let filled: String = sheet
        .lines()
        .map(|line| {
            if line.contains("Carlos Mendoza") {
                line.replacen(";0;0;0;0;0", ";3;2;0;1;1", 1)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let rows = parse_box_csv(filled.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(league.import_box_score(&game, rows).unwrap(), 3);
    league.recompute_player_stats();

    let m = league.find_match(&game).unwrap();
    assert_eq!((m.local_score, m.visit_score), (1, 0));
    let carlos = league.players.iter().find(|p| p.nombre == "Carlos Mendoza").unwrap();
    assert_eq!(carlos.stats.h, 2);
    assert_eq!(carlos.stats.avg, ".667");
}
