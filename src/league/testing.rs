//! Shared fixtures for league unit tests

use crate::cli::types::{MatchId, PlayerId, TeamId};
use crate::league::calendar::MatchDraft;
use crate::league::models::League;
use crate::league::roster::{PlayerDraft, TeamDraft};
use chrono::NaiveDate;

pub struct Fixture {
    pub league: League,
    pub tigres: TeamId,
    pub leones: TeamId,
    pub game: MatchId,
    /// Tigres players: two approved, then one unapproved.
    pub t1: PlayerId,
    pub t2: PlayerId,
    pub t3: PlayerId,
    /// Leones players, both approved.
    pub l1: PlayerId,
    pub l2: PlayerId,
}

pub fn add_test_player(league: &mut League, nombre: &str, team: &TeamId, verificado: bool) -> PlayerId {
    league
        .add_player(PlayerDraft {
            nombre: Some(nombre.to_string()),
            team_id: Some(team.clone()),
            posicion: Some("SS".to_string()),
            verificado: Some(verificado),
            ..PlayerDraft::default()
        })
        .unwrap()
}

pub fn create_test_league() -> Fixture {
    let mut league = League::default();
    let tigres = league.add_team(TeamDraft::named("Tigres")).unwrap();
    let leones = league.add_team(TeamDraft::named("Leones")).unwrap();

    let t1 = add_test_player(&mut league, "Carlos Mendoza", &tigres, true);
    let t2 = add_test_player(&mut league, "Luis Ortega", &tigres, true);
    let t3 = add_test_player(&mut league, "Pedro Sin Aprobar", &tigres, false);
    let l1 = add_test_player(&mut league, "Jorge Ruiz", &leones, true);
    let l2 = add_test_player(&mut league, "Mario Vega", &leones, true);

    let game = league
        .add_match(MatchDraft {
            local: tigres.clone(),
            visitante: leones.clone(),
            fecha: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            hora: "10:00".to_string(),
            campo: "Campo 1".to_string(),
            jornada: Some("1".to_string()),
            arbitro: String::new(),
        })
        .unwrap();

    Fixture {
        league,
        tigres,
        leones,
        game,
        t1,
        t2,
        t3,
        l1,
        l2,
    }
}

/// Schedule a match on the given day of June 2025.
pub fn add_test_match(league: &mut League, local: &TeamId, visitante: &TeamId, day: u32) -> MatchId {
    league
        .add_match(MatchDraft {
            local: local.clone(),
            visitante: visitante.clone(),
            fecha: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            hora: String::new(),
            campo: String::new(),
            jornada: None,
            arbitro: String::new(),
        })
        .unwrap()
}
