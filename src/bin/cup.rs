//! Console cup manager: load or create the tournament for the configured roster,
//! then draw and ask for scores until a champion is crowned. Progress is saved
//! after every step, so the run can be stopped and resumed at any time.
//! Run with: cargo run --bin cup

use cup_tournament_draw::{
    load_roster, tournament_key, Config, ConsoleScoreProvider, CupTournament, DriverError,
    DriverOptions, JsonFileStore, RoundProgress, Step, TournamentDriver,
};
use std::process::ExitCode;

fn print_draw(tournament: &CupTournament, round_index: usize) {
    let Some(round) = tournament.rounds.get(round_index) else {
        return;
    };
    println!("{} draw:", round.name);
    for (i, m) in round.matches.iter().enumerate() {
        println!("  {:>2}. {} v {}", i + 1, m.home, m.away);
    }
    if !round.byes.is_empty() {
        let byes: Vec<&str> = round.byes.iter().map(|t| t.name.as_str()).collect();
        println!("  Byes: {}", byes.join(", "));
    }
}

fn run(config: &Config) -> Result<(), DriverError> {
    let key = tournament_key(&config.roster_path);
    let store = JsonFileStore::new(&config.data_dir);
    log::info!("Cup tournament file path is {}", store.path_for(&key).display());

    let options = DriverOptions {
        draw_seed: config.draw_seed,
    };
    let mut driver = TournamentDriver::new(store, options);
    let mut tournament = driver.load_or_create(&key, || load_roster(&config.roster_path))?;
    let mut scores = ConsoleScoreProvider::stdio();

    loop {
        match driver.step(&mut tournament, &mut scores)? {
            Step::Complete => break,
            Step::Progressed {
                round_index,
                progress: RoundProgress::Drawn,
                ..
            } => print_draw(&tournament, round_index),
            Step::Progressed {
                round_index,
                round_name,
                ..
            } => {
                if tournament.rounds.get(round_index).is_some_and(|r| r.complete) {
                    println!("{} complete", round_name);
                }
            }
        }
    }

    match tournament.champion() {
        Some(champion) => println!("{} win the cup!", champion),
        None => log::warn!("Tournament finished without a champion"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
