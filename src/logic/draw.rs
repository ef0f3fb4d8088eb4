//! Cup draw: byes to the top seeds, then a seed-blind ball draw for the pairings.

use crate::models::{Match, Round, Team, TournamentError};
use rand::Rng;

/// Draw balls numbered `1..=n` from a bowl until it is empty.
///
/// Returns the numbers in the order drawn, i.e. a uniformly random permutation.
pub fn draw_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut bowl: Vec<usize> = (1..=n).collect();
    let mut drawn = Vec::with_capacity(n);
    while !bowl.is_empty() {
        let index = rng.gen_range(0..bowl.len());
        drawn.push(bowl.remove(index));
    }
    drawn
}

/// Make the draw for a round with entrants.
///
/// 1. Sort entrants by rank; the best `target_byes` get byes.
/// 2. Of the rest, the `target_competitors` weakest form the pool, ordered by name.
/// 3. Balls are drawn two at a time: first is home, second is away.
pub fn draw_round<R: Rng + ?Sized>(round: &mut Round, rng: &mut R) -> Result<(), TournamentError> {
    if round.is_drawn() {
        return Err(TournamentError::AlreadyDrawn(round.name.clone()));
    }
    let needed = round.target_byes + round.target_competitors;
    if round.entrants.len() < needed {
        return Err(TournamentError::NotEnoughEntrants {
            round: round.name.clone(),
            needed,
            available: round.entrants.len(),
        });
    }
    if round.target_competitors % 2 != 0 {
        return Err(TournamentError::OddCompetitorCount {
            round: round.name.clone(),
            count: round.target_competitors,
        });
    }

    if round.entrants.len() > needed {
        log::warn!(
            "{} has {} entrants but only places {}; the round cannot balance",
            round.name,
            round.entrants.len(),
            needed
        );
    }

    log::info!(
        "Drawing {}: {} teams, {} in matches, {} byes",
        round.name,
        round.entrants.len(),
        round.target_competitors,
        round.target_byes
    );

    let mut seeded: Vec<Team> = round.entrants.clone();
    seeded.sort_by_key(|t| t.rank);
    let rest = seeded.split_off(round.target_byes);
    let byes = seeded;

    let mut pool: Vec<Team> = rest;
    pool.sort_by(|a, b| b.rank.cmp(&a.rank));
    pool.truncate(round.target_competitors);
    pool.sort_by(|a, b| a.name.cmp(&b.name));

    let matches: Vec<Match> = draw_permutation(pool.len(), rng)
        .chunks_exact(2)
        .map(|pair| {
            let (home, away) = (&pool[pair[0] - 1], &pool[pair[1] - 1]);
            log::info!("({}) {} v ({}) {}", pair[0], home, pair[1], away);
            Match::new(home.clone(), away.clone())
        })
        .collect();

    round.byes = byes;
    round.matches = matches;
    Ok(())
}
