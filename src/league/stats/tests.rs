use super::*;

fn turn(result: Option<TurnResult>) -> Turn {
    Turn {
        result,
        ..Turn::default()
    }
}

#[test]
fn test_empty_turns() {
    let s = batting_summary(&[]);
    assert_eq!(s.pa, 0);
    assert_eq!(s.ab, 0);
    assert_eq!(s.avg, ".000");
}

#[test]
fn test_scorecard_example() {
    // H with 1 RBI, a walk, a home run that scored with 2 RBI
    let turns = vec![
        Turn {
            result: Some(TurnResult::Single),
            rbi: 1,
            ..Turn::default()
        },
        turn(Some(TurnResult::Walk)),
        Turn {
            result: Some(TurnResult::HomeRun),
            scored_run: true,
            rbi: 2,
            ..Turn::default()
        },
    ];

    let s = batting_summary(&turns);
    assert_eq!(s.pa, 3);
    assert_eq!(s.bb, 1);
    assert_eq!(s.ab, 2);
    assert_eq!(s.h, 2);
    assert_eq!(s.hr, 1);
    assert_eq!(s.rbi, 3);
    assert_eq!(s.r, 1);
    assert_eq!(s.avg, "1.000");
}

#[test]
fn test_unrecorded_turns_are_ignored() {
    let turns = vec![
        Turn {
            result: None,
            stolen_base: true,
            scored_run: true,
            rbi: 3,
            hit_direction: Some("LF".to_string()),
        },
        turn(Some(TurnResult::Out)),
    ];

    let s = batting_summary(&turns);
    assert_eq!(s.pa, 1);
    assert_eq!(s.ab, 1);
    assert_eq!(s.o, 1);
    assert_eq!(s.sb, 0);
    assert_eq!(s.r, 0);
    assert_eq!(s.rbi, 0);
}

#[test]
fn test_flags_independent_of_result() {
    let turns = vec![
        Turn {
            result: Some(TurnResult::Walk),
            stolen_base: true,
            scored_run: true,
            ..Turn::default()
        },
        Turn {
            result: Some(TurnResult::Error),
            scored_run: true,
            ..Turn::default()
        },
    ];

    let s = batting_summary(&turns);
    assert_eq!(s.sb, 1);
    assert_eq!(s.r, 2);
    assert_eq!(s.h, 0);
    assert_eq!(s.ab, 1);
    assert_eq!(s.avg, ".000");
}

#[test]
fn test_extra_base_hits_counted() {
    let turns = vec![
        turn(Some(TurnResult::Double)),
        turn(Some(TurnResult::Triple)),
        turn(Some(TurnResult::Strikeout)),
    ];

    let s = batting_summary(&turns);
    assert_eq!(s.h, 2);
    assert_eq!(s.doubles, 1);
    assert_eq!(s.triples, 1);
    assert_eq!(s.k, 1);
    assert_eq!(s.ab, 3);
    assert_eq!(s.avg, ".667");
}

#[test]
fn test_pa_equals_ab_plus_bb() {
    let all = [
        TurnResult::Single,
        TurnResult::Double,
        TurnResult::Triple,
        TurnResult::HomeRun,
        TurnResult::Walk,
        TurnResult::Error,
        TurnResult::Strikeout,
        TurnResult::Out,
    ];
    for (i, first) in all.iter().enumerate() {
        for second in &all[i..] {
            let turns = vec![turn(Some(*first)), turn(None), turn(Some(*second))];
            let s = batting_summary(&turns);
            assert_eq!(s.pa, s.ab + s.bb, "{:?} {:?}", first, second);
        }
    }
}

#[test]
fn test_summary_is_idempotent() {
    let turns = vec![
        turn(Some(TurnResult::Single)),
        turn(Some(TurnResult::Out)),
        turn(Some(TurnResult::Walk)),
    ];
    let before = turns.clone();

    let first = batting_summary(&turns);
    let second = batting_summary(&turns);
    assert_eq!(first, second);
    assert_eq!(turns, before);
}

#[test]
fn test_format_avg() {
    assert_eq!(format_avg(0, 0), ".000");
    assert_eq!(format_avg(0, 4), ".000");
    assert_eq!(format_avg(1, 3), ".333");
    assert_eq!(format_avg(2, 3), ".667");
    assert_eq!(format_avg(24, 75), ".320");
    assert_eq!(format_avg(3, 3), "1.000");
}

#[test]
fn test_avg_matches_ratio() {
    for ab in 1..=12u32 {
        for h in 0..=ab {
            let expected = format!("{:.3}", h as f64 / ab as f64);
            let expected = expected.strip_prefix('0').unwrap_or(&expected).to_string();
            assert_eq!(format_avg(h, ab), expected);
        }
    }
}

#[test]
fn test_box_line_projection() {
    let turns = vec![
        Turn {
            result: Some(TurnResult::HomeRun),
            scored_run: true,
            rbi: 4,
            ..Turn::default()
        },
        turn(Some(TurnResult::Walk)),
    ];
    let line = batting_summary(&turns).box_line();
    assert_eq!(
        line,
        BoxLine {
            ab: 1,
            h: 1,
            hr: 1,
            rbi: 4,
            r: 1
        }
    );
}
