//! Integration tests for the driver loop: seeding, promotion, saving and resuming.

use cup_tournament_draw::{
    CupTournament, DriverError, DriverOptions, InMemoryStore, RosterError, RoundProgress, Score,
    ScriptedScores, Step, Team, TournamentDriver, TournamentError, TournamentStatus,
    TournamentStore,
};

fn teams(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(i as u32, format!("Team {i:03}"))).collect()
}

fn home_wins(n: usize) -> ScriptedScores {
    ScriptedScores::new((0..n).map(|_| Score::new(1, 0)))
}

fn seeded_driver(seed: u64) -> TournamentDriver<InMemoryStore> {
    TournamentDriver::new(InMemoryStore::new(), DriverOptions { draw_seed: Some(seed) })
}

#[test]
fn five_team_cup_runs_to_a_champion() {
    let mut driver = seeded_driver(1);
    let mut t = driver.load_or_create("five", || Ok(teams(5))).unwrap();
    // 1 qualifier + 2 semis + 1 final
    let mut scores = home_wins(4);

    let champion = driver.run(&mut t, &mut scores).unwrap();

    assert_eq!(t.status(), TournamentStatus::Complete);
    assert_eq!(scores.remaining(), 0);
    assert_eq!(t.rounds.len(), 3);
    assert!(t.rounds.iter().all(|r| r.is_complete() && r.complete));
    assert_eq!(champion, t.rounds[2].matches[0].home);
    assert_eq!(t.champion(), Some(&champion));

    let saved = driver.store().load("five").unwrap().unwrap();
    assert_eq!(saved.rounds, t.rounds);
}

#[test]
fn winners_and_byes_become_the_next_round() {
    let mut driver = seeded_driver(2);
    let mut t = driver.load_or_create("seven", || Ok(teams(7))).unwrap();
    let mut scores = home_wins(6);
    driver.run(&mut t, &mut scores).unwrap();

    let qualifying = &t.rounds[0];
    assert_eq!(qualifying.name, "Qualifying");
    assert_eq!(qualifying.entrants, t.teams);
    assert_eq!(qualifying.byes.len(), 1);
    assert_eq!(qualifying.matches.len(), 3);

    let semis = &t.rounds[1];
    let mut expected = qualifying.advancing_teams().unwrap();
    let mut actual = semis.entrants.clone();
    expected.sort_by_key(|t| t.rank);
    actual.sort_by_key(|t| t.rank);
    assert_eq!(actual, expected);
    assert!(semis.entrants.contains(&t.teams[0]), "top seed had a bye");
}

#[test]
fn power_of_two_cup_starts_with_the_full_roster() {
    let mut driver = seeded_driver(3);
    let mut t = driver.load_or_create("eight", || Ok(teams(8))).unwrap();
    assert_eq!(t.rounds[0].name, "Quarter Finals");

    let mut scores = home_wins(7);
    let step = driver.step(&mut t, &mut scores).unwrap();
    assert_eq!(
        step,
        Step::Progressed {
            round_index: 0,
            round_name: "Quarter Finals".to_string(),
            progress: RoundProgress::Drawn,
        }
    );
    assert_eq!(t.rounds[0].entrants.len(), 8);
    assert_eq!(t.rounds[0].matches.len(), 4);

    driver.run(&mut t, &mut scores).unwrap();
    assert_eq!(scores.remaining(), 0);
}

#[test]
fn draws_and_shootouts_decide_ties() {
    let mut driver = seeded_driver(4);
    let mut t = driver.load_or_create("pens", || Ok(teams(2))).unwrap();
    let mut scores = ScriptedScores::new([Score::new(2, 2), Score::new(3, 3), Score::new(3, 4)]);

    let champion = driver.run(&mut t, &mut scores).unwrap();
    let fin = &t.rounds[0].matches[0];
    assert_eq!(champion, fin.away);
    assert_eq!(fin.penalties, Some(Score::new(3, 4)));
}

#[test]
fn a_saved_tournament_resumes_where_it_stopped() {
    let mut driver = seeded_driver(5);
    let mut t = driver.load_or_create("resume", || Ok(teams(6))).unwrap();

    // Draw the qualifier and play one of its two matches.
    let mut first = home_wins(1);
    driver.step(&mut t, &mut first).unwrap();
    driver.step(&mut t, &mut first).unwrap();
    assert!(matches!(
        driver.step(&mut t, &mut first),
        Err(DriverError::Tournament(TournamentError::ScoreUnavailable(_)))
    ));

    let mut resumed = driver
        .load_or_create("resume", || panic!("roster must not be reloaded"))
        .unwrap();
    assert_eq!(resumed.rounds[0].matches, t.rounds[0].matches);
    assert_eq!(resumed.rounds[0].next_undecided(), Some(1));

    // 1 qualifier left + 2 semis + final
    let mut rest = home_wins(4);
    driver.run(&mut resumed, &mut rest).unwrap();
    assert_eq!(rest.remaining(), 0);
}

#[test]
fn load_or_create_reports_roster_errors() {
    let mut driver = seeded_driver(6);
    let err = driver
        .load_or_create("dup", || Err(RosterError::DuplicateName("Team 001".to_string())))
        .unwrap_err();
    assert!(matches!(err, DriverError::Roster(RosterError::DuplicateName(_))));

    let err = driver.load_or_create("tiny", || Ok(teams(1))).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Tournament(TournamentError::NotEnoughTeams { found: 1 })
    ));
    assert!(driver.store().is_empty());
}

#[test]
fn same_seed_same_draw() {
    let draw = |seed| {
        let mut driver = seeded_driver(seed);
        let mut t = driver.load_or_create("cup", || Ok(teams(32))).unwrap();
        driver.step(&mut t, &mut ScriptedScores::default()).unwrap();
        t.rounds[0].matches.clone()
    };
    assert_eq!(draw(10), draw(10));
    assert_ne!(draw(10), draw(11));
}

#[test]
fn complete_tournament_has_nothing_left_to_do() {
    let mut driver = seeded_driver(7);
    let mut t = CupTournament::create("done", teams(2)).unwrap();
    driver.run(&mut t, &mut home_wins(1)).unwrap();
    let before = t.clone();
    assert_eq!(driver.step(&mut t, &mut ScriptedScores::default()).unwrap(), Step::Complete);
    assert_eq!(t, before);
}
