//! Unit tests for CSV import/export

use super::*;
use crate::league::testing::create_test_league;

const CARLOS: &str = "Carlos Mendoza;7;Tigres;Pitcher;habilitado;1.80;85;42;.320;5;12;24;75;10";

fn output_text(bytes: Vec<u8>) -> String {
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with(BOM));
    text.trim_start_matches(BOM).to_string()
}

#[test]
fn test_leading_int() {
    assert_eq!(leading_int("7"), 7);
    assert_eq!(leading_int(" 12b "), 12);
    assert_eq!(leading_int("abc"), 0);
    assert_eq!(leading_int(""), 0);
}

#[test]
fn test_import_single_row_without_header() {
    let rows = parse_roster_csv(CARLOS.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);

    let mut league = League::default();
    let ids = league.import_roster(rows).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(league.players.len(), 1);

    let player = league.player(&ids[0]).unwrap();
    assert_eq!(player.nombre, "Carlos Mendoza");
    assert_eq!(player.dorsal, 7);
    assert_eq!(player.estado, PlayerEstado::Habilitado);
    assert_eq!(player.stats.avg, ".320");
    assert_eq!(player.stats.ab, 75);
    assert_eq!(player.altura, "1.80");
    assert!(!player.verificado);
    assert_eq!(league.team_name(&player.team_id), "Tigres");
}

#[test]
fn test_import_skips_header_bom_and_short_rows() {
    let text = format!(
        "{}Nombre;Dorsal;Equipo\n{}\nSolo;Dos\n\nAna Ruiz;x;Leones;;SUSPENDIDO\n",
        BOM, CARLOS
    );
    let rows = parse_roster_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);

    let ana = &rows[1];
    assert_eq!(ana.dorsal, 0);
    assert_eq!(ana.posicion, DEFAULT_POSITION);
    assert_eq!(ana.estado, PlayerEstado::Suspendido);
    assert_eq!(ana.stats, SeasonStats::default());
}

#[test]
fn test_import_reuses_existing_team_case_insensitively() {
    let mut fx = create_test_league();
    let rows = parse_roster_csv("Nuevo;3;TIGRES\nOtro;4;Halcones".as_bytes()).unwrap();
    let ids = fx.league.import_roster(rows).unwrap();

    assert_eq!(fx.league.player(&ids[0]).unwrap().team_id, fx.tigres);
    assert_eq!(fx.league.teams.len(), 3);
    assert_eq!(ids[0].as_str(), "006");
}

#[test]
fn test_export_team_roster() {
    let fx = create_test_league();
    let mut out = Vec::new();
    let written = write_roster_csv(&fx.league, Some(&fx.leones), &mut out).unwrap();
    assert_eq!(written, 2);

    let text = output_text(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], ROSTER_HEADERS.join(";"));
    assert!(lines[1].starts_with("Jorge Ruiz;0;Leones;SS;habilitado"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_then_import_keeps_players() {
    let fx = create_test_league();
    let mut out = Vec::new();
    write_roster_csv(&fx.league, None, &mut out).unwrap();

    let rows = parse_roster_csv(out.as_slice()).unwrap();
    assert_eq!(rows.len(), fx.league.players.len());
    assert_eq!(rows[3].nombre, "Jorge Ruiz");
    assert_eq!(rows[3].equipo, "Leones");
}

#[test]
fn test_roster_template_parses_as_example_player() {
    let mut out = Vec::new();
    write_roster_template(&mut out).unwrap();
    let rows = parse_roster_csv(out.as_slice()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].nombre, "Carlos Mendoza");
    assert_eq!(rows[0].equipo, "Tigres de Vallecas");
}

#[test]
fn test_box_template_lists_both_rosters() {
    let mut fx = create_test_league();
    fx.league
        .set_box_line(&fx.game, &fx.l1, BoxLine { ab: 4, h: 2, ..BoxLine::default() })
        .unwrap();

    let mut out = Vec::new();
    let written = write_box_template(&fx.league, &fx.game, &mut out).unwrap();
    assert_eq!(written, 5);

    let text = output_text(out);
    assert!(text.lines().any(|l| l == "004;Jorge Ruiz;Leones;4;2;0;0;0"));
    assert!(write_box_template(&fx.league, &MatchId::new("p1"), Vec::new()).is_err());
}

#[test]
fn test_box_import_applies_known_players_and_scores() {
    let mut fx = create_test_league();
    let text = "JugadorID;Nombre;Equipo;AB;H;HR;RBI;R\n\
                001;Carlos;Tigres;4;2;1;2;3\n\
                004;Jorge;Leones;3;1;0;0;1\n\
                999;Nadie;X;1;1;1;1;1\n\
                ;Sin id;X;1;1;1;1;1\n";
    let rows = parse_box_csv(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);

    let applied = fx.league.import_box_score(&fx.game, rows).unwrap();
    assert_eq!(applied, 2);

    let m = fx.league.find_match(&fx.game).unwrap();
    assert_eq!(m.player_stats[&fx.t1].hr, 1);
    assert_eq!((m.local_score, m.visit_score), (3, 1));
}
