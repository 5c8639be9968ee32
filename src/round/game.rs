//! Seven-round game orchestration

use super::{ConundrumRound, Countdown, LettersRound, NumbersRound, Phase, RoundError};
use crate::core::Language;
use crate::solver::ConundrumPuzzle;
use crate::storage::Settings;
use crate::wordlists::Lexicon;
use rand::Rng;
use std::fmt;

/// The kind of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundKind {
    Letters,
    Numbers,
    Conundrum,
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Letters => "Letters",
            Self::Numbers => "Numbers",
            Self::Conundrum => "Conundrum",
        };
        f.pad(name)
    }
}

/// Round order of a full game
pub const ROUND_SCHEDULE: [RoundKind; 7] = [
    RoundKind::Letters,
    RoundKind::Numbers,
    RoundKind::Letters,
    RoundKind::Numbers,
    RoundKind::Letters,
    RoundKind::Numbers,
    RoundKind::Conundrum,
];

pub const TOTAL_ROUNDS: usize = ROUND_SCHEDULE.len();

/// The state of whichever round is being played
#[derive(Debug, Clone)]
pub enum ActiveRound {
    Letters(LettersRound),
    Numbers(NumbersRound),
    Conundrum(ConundrumRound),
}

impl ActiveRound {
    #[must_use]
    pub const fn kind(&self) -> RoundKind {
        match self {
            Self::Letters(_) => RoundKind::Letters,
            Self::Numbers(_) => RoundKind::Numbers,
            Self::Conundrum(_) => RoundKind::Conundrum,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Letters(r) => r.phase(),
            Self::Numbers(r) => r.phase(),
            Self::Conundrum(r) => r.phase(),
        }
    }

    #[must_use]
    pub const fn countdown(&self) -> Option<&Countdown> {
        match self {
            Self::Letters(r) => r.countdown(),
            Self::Numbers(r) => r.countdown(),
            Self::Conundrum(r) => r.countdown(),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            Self::Letters(r) => r.score(),
            Self::Numbers(r) => r.score(),
            Self::Conundrum(r) => r.score(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Result
    }
}

/// Running total over the seven rounds of one game
#[derive(Debug, Clone, Default)]
pub struct Game {
    language: Language,
    scores: Vec<u32>,
}

impl Game {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self {
            language,
            scores: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// The round to play next, or `None` once the game is over
    #[must_use]
    pub fn current_kind(&self) -> Option<RoundKind> {
        ROUND_SCHEDULE.get(self.scores.len()).copied()
    }

    /// One-based number of the current round, capped at the last round
    #[must_use]
    pub fn round_number(&self) -> usize {
        (self.scores.len() + 1).min(TOTAL_ROUNDS)
    }

    /// Set up the next round with the configured durations
    ///
    /// # Errors
    /// Fails if the game is over or no conundrum answer is available.
    pub fn start_round<R: Rng + ?Sized>(
        &self,
        settings: &Settings,
        lexicon: &Lexicon,
        rng: &mut R,
    ) -> Result<ActiveRound, RoundError> {
        let kind = self.current_kind().ok_or(RoundError::WrongPhase {
            expected: Phase::Picking,
            actual: Phase::Result,
        })?;
        let duration = settings.duration_for(kind);
        tracing::debug!(round = self.round_number(), %kind, "starting round");

        Ok(match kind {
            RoundKind::Letters => ActiveRound::Letters(LettersRound::new(duration)),
            RoundKind::Numbers => ActiveRound::Numbers(NumbersRound::new(duration)),
            RoundKind::Conundrum => {
                let puzzle = ConundrumPuzzle::draw(lexicon, self.language, rng)?;
                ActiveRound::Conundrum(ConundrumRound::new(puzzle, duration))
            }
        })
    }

    /// Record the current round's score and move on
    ///
    /// Scores recorded after the last round are ignored.
    pub fn record(&mut self, score: u32) {
        if self.is_over() {
            tracing::warn!(score, "game already over, score ignored");
            return;
        }
        self.scores.push(score);
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.scores.len() >= TOTAL_ROUNDS
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.scores.iter().sum()
    }

    /// Per-round scores so far
    #[inline]
    #[must_use]
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Rounds completed, as stored in the high-score table
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        u32::try_from(self.scores.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn schedule_alternates_and_ends_with_conundrum() {
        assert_eq!(TOTAL_ROUNDS, 7);
        assert_eq!(ROUND_SCHEDULE[6], RoundKind::Conundrum);
        for (i, kind) in ROUND_SCHEDULE[..6].iter().enumerate() {
            let expected = if i % 2 == 0 {
                RoundKind::Letters
            } else {
                RoundKind::Numbers
            };
            assert_eq!(*kind, expected);
        }
    }

    #[test]
    fn records_seven_rounds() {
        let mut game = Game::new(Language::English);
        for score in [5, 10, 7, 0, 6, 5, 10] {
            assert!(!game.is_over());
            game.record(score);
        }
        assert!(game.is_over());
        assert_eq!(game.total_score(), 43);
        assert_eq!(game.rounds_played(), 7);
        assert_eq!(game.current_kind(), None);
        assert_eq!(game.round_number(), TOTAL_ROUNDS);

        game.record(10);
        assert_eq!(game.total_score(), 43);
    }

    #[test]
    fn start_round_follows_schedule() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = Settings::default();
        let lexicon = Lexicon::embedded();
        let mut game = Game::new(Language::English);

        for expected in ROUND_SCHEDULE {
            let round = game.start_round(&settings, &lexicon, &mut rng).unwrap();
            assert_eq!(round.kind(), expected);
            assert!(!round.is_finished());
            game.record(round.score());
        }
        assert!(game.start_round(&settings, &lexicon, &mut rng).is_err());
    }

    #[test]
    fn conundrum_uses_game_language() {
        let mut rng = StdRng::seed_from_u64(4);
        let lexicon = Lexicon::embedded();
        let mut game = Game::new(Language::French);
        for _ in 0..6 {
            game.record(0);
        }

        let round = game
            .start_round(&Settings::default(), &lexicon, &mut rng)
            .unwrap();
        let ActiveRound::Conundrum(conundrum) = round else {
            panic!("expected conundrum round");
        };
        assert_eq!(conundrum.puzzle().language(), Language::French);
        assert_eq!(conundrum.phase(), Phase::Ready);
    }
}
