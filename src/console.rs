//! Console score entry: prompt for `home-away` scores and re-prompt on bad input.

use crate::logic::{ScoreContext, ScoreProvider};
use crate::models::{Match, Score, TournamentError};
use std::io::{BufRead, Write};

/// Parse a `home-away` score such as `2-1`. Surrounding whitespace is ignored.
pub fn parse_score(input: &str) -> Option<Score> {
    let (home, away) = input.trim().split_once('-')?;
    Some(Score::new(home.trim().parse().ok()?, away.trim().parse().ok()?))
}

/// Reads scores line by line from `input`, writing prompts to `output`.
pub struct ConsoleScoreProvider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleScoreProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>, TournamentError> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .map_err(|e| TournamentError::ScoreUnavailable(e.to_string()))?;
        Ok((n > 0).then_some(line))
    }

    fn say(&mut self, text: std::fmt::Arguments<'_>) -> Result<(), TournamentError> {
        writeln!(self.output, "{}", text)
            .and_then(|_| self.output.flush())
            .map_err(|e| TournamentError::ScoreUnavailable(e.to_string()))
    }
}

impl ConsoleScoreProvider<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ScoreProvider for ConsoleScoreProvider<R, W> {
    fn match_score(&mut self, fixture: &Match, context: ScoreContext) -> Result<Score, TournamentError> {
        self.say(format_args!(
            "Enter the {} score for {} v {} (e.g., 2-1):",
            context, fixture.home, fixture.away
        ))?;
        loop {
            let Some(line) = self.read_line()? else {
                return Err(TournamentError::ScoreUnavailable(
                    "input closed before a score was entered".to_string(),
                ));
            };
            if let Some(score) = parse_score(&line) {
                if context == ScoreContext::Penalties && score.is_draw() {
                    self.say(format_args!("Penalties cannot end in a draw."))?;
                }
                return Ok(score);
            }
            self.say(format_args!(
                "Invalid score format. Please enter the score in the format 'homeScore-awayScore'."
            ))?;
        }
    }
}
