//! Integration tests for the cup draw: byes, pool ordering and the ball draw.

use cup_tournament_draw::{draw_permutation, draw_round, Round, Team, TournamentError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

fn teams(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(i as u32, format!("Team {i:03}"))).collect()
}

fn round_with(entrants: Vec<Team>, competitors: usize, byes: usize) -> Round {
    let mut r = Round::new("Test", competitors, byes);
    r.entrants = entrants;
    r
}

fn participants(round: &Round) -> Vec<&Team> {
    round.matches.iter().flat_map(|m| [&m.home, &m.away]).collect()
}

#[test]
fn permutation_uses_every_ball_once() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [0, 1, 2, 9, 32] {
        let mut drawn = draw_permutation(n, &mut rng);
        assert_eq!(drawn.len(), n);
        drawn.sort_unstable();
        assert_eq!(drawn, (1..=n).collect::<Vec<_>>());
    }
}

#[test]
fn different_seeds_give_different_draws() {
    let draws: HashSet<Vec<usize>> = (0..20)
        .map(|seed| draw_permutation(16, &mut StdRng::seed_from_u64(seed)))
        .collect();
    assert!(draws.len() > 1);
}

#[test]
fn four_teams_no_byes_makes_two_matches() {
    let mut round = round_with(teams(4), 4, 0);
    draw_round(&mut round, &mut StdRng::seed_from_u64(1)).unwrap();

    assert!(round.byes.is_empty());
    assert_eq!(round.matches.len(), 2);
    let mut names: Vec<_> = participants(&round).iter().map(|t| t.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["Team 001", "Team 002", "Team 003", "Team 004"]);
    assert!(!round.is_complete());
}

#[test]
fn byes_go_to_the_strongest_seeds() {
    let mut round = round_with(teams(5), 2, 3);
    draw_round(&mut round, &mut StdRng::seed_from_u64(3)).unwrap();

    let bye_ranks: Vec<u32> = round.byes.iter().map(|t| t.rank).collect();
    assert_eq!(bye_ranks, vec![1, 2, 3]);
    assert_eq!(round.matches.len(), 1);
    let mut ranks = [round.matches[0].home.rank, round.matches[0].away.rank];
    ranks.sort_unstable();
    assert_eq!(ranks, [4, 5]);
}

#[test]
fn pairings_follow_the_ball_draw_over_the_alphabetical_pool() {
    let entrants = vec![
        Team::new(4, "Delta"),
        Team::new(2, "Bravo"),
        Team::new(6, "Foxtrot"),
        Team::new(1, "Alpha"),
        Team::new(5, "Echo"),
        Team::new(3, "Charlie"),
    ];
    let mut round = round_with(entrants, 4, 2);
    draw_round(&mut round, &mut StdRng::seed_from_u64(11)).unwrap();

    // Alpha and Bravo take the byes; the pool is the rest, sorted by name.
    let pool = ["Charlie", "Delta", "Echo", "Foxtrot"];
    let balls = draw_permutation(4, &mut StdRng::seed_from_u64(11));
    let expected: Vec<(&str, &str)> = balls
        .chunks(2)
        .map(|p| (pool[p[0] - 1], pool[p[1] - 1]))
        .collect();
    let actual: Vec<(&str, &str)> = round
        .matches
        .iter()
        .map(|m| (m.home.name.as_str(), m.away.name.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn entrant_order_does_not_change_the_draw() {
    let mut shuffled = teams(12);
    shuffled.shuffle(&mut StdRng::seed_from_u64(99));

    let mut a = round_with(teams(12), 8, 4);
    let mut b = round_with(shuffled, 8, 4);
    draw_round(&mut a, &mut StdRng::seed_from_u64(5)).unwrap();
    draw_round(&mut b, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.matches, b.matches);
    assert_eq!(a.byes, b.byes);
}

#[test]
fn every_entrant_either_plays_once_or_has_a_bye() {
    for n in 3..=40usize {
        if n.is_power_of_two() {
            continue;
        }
        let bracket = 1 << (usize::BITS - 1 - n.leading_zeros());
        let competitors = (n - bracket) * 2;
        let mut round = round_with(teams(n), competitors, n - competitors);
        draw_round(&mut round, &mut StdRng::seed_from_u64(n as u64)).unwrap();

        assert_eq!(round.byes.len(), n - competitors);
        assert_eq!(round.matches.len(), competitors / 2);

        let players: HashSet<&Team> = participants(&round).into_iter().collect();
        let byes: HashSet<&Team> = round.byes.iter().collect();
        assert_eq!(players.len(), competitors, "no team plays twice, n={n}");
        assert!(players.is_disjoint(&byes));
        let all: HashSet<&Team> = players.union(&byes).copied().collect();
        assert_eq!(all, round.entrants.iter().collect::<HashSet<_>>());
        assert_eq!(round.matches.len() * 2 + round.byes.len(), round.entrants.len());
    }
}

#[test]
fn too_few_entrants_is_rejected() {
    let mut round = round_with(teams(3), 4, 0);
    assert_eq!(
        draw_round(&mut round, &mut StdRng::seed_from_u64(0)),
        Err(TournamentError::NotEnoughEntrants {
            round: "Test".to_string(),
            needed: 4,
            available: 3,
        })
    );
    assert!(round.matches.is_empty());
}

#[test]
fn odd_competitor_count_is_rejected() {
    let mut round = round_with(teams(3), 3, 0);
    assert!(matches!(
        draw_round(&mut round, &mut StdRng::seed_from_u64(0)),
        Err(TournamentError::OddCompetitorCount { count: 3, .. })
    ));
}

#[test]
fn a_round_is_only_drawn_once() {
    let mut round = round_with(teams(4), 4, 0);
    let mut rng = StdRng::seed_from_u64(0);
    draw_round(&mut round, &mut rng).unwrap();
    let first = round.matches.clone();
    assert!(matches!(
        draw_round(&mut round, &mut rng),
        Err(TournamentError::AlreadyDrawn(_))
    ));
    assert_eq!(round.matches, first);
}
