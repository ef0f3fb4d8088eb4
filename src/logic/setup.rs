//! Seeding: fill a round's entrants from the roster or the previous round.

use crate::models::{CupTournament, TournamentError};

/// Fill the entrants of round `index`.
///
/// The first round takes the full roster; later rounds take the previous
/// round's winners followed by its bye teams. The previous round must be complete.
pub fn seed_round(tournament: &mut CupTournament, index: usize) -> Result<(), TournamentError> {
    let entrants = if index == 0 {
        log::info!("This is the first round, teams added from the roster");
        tournament.teams.clone()
    } else {
        log::info!("Winners and byes from the previous round being added");
        tournament.round(index - 1)?.advancing_teams()?
    };
    let round = tournament.round_mut(index)?;
    round.entrants.extend(entrants);
    log::info!("{} has {} entrants", round.name, round.entrants.len());
    Ok(())
}
