//! Cup business logic: draw, round progression, seeding, and the driver loop.

mod draw;
mod driver;
mod progress;
mod setup;

pub use draw::{draw_permutation, draw_round};
pub use driver::{DriverError, DriverOptions, Step, TournamentDriver};
pub use progress::{progress_round, RoundProgress, ScoreContext, ScoreProvider, ScriptedScores};
pub use setup::seed_round;
