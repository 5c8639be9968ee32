//! Conundrum round
//!
//! Wrong guesses may be retried until the clock runs out.

use super::{Countdown, Phase, RoundError, expect_phase};
use crate::core::CONUNDRUM_SCORE;
use crate::solver::ConundrumPuzzle;
use std::time::{Duration, Instant};

/// Result of one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    /// Wrong; the round continues
    Incorrect,
    /// Blank guesses are ignored
    Empty,
}

#[derive(Debug, Clone)]
pub struct ConundrumRound {
    puzzle: ConundrumPuzzle,
    phase: Phase,
    duration: Duration,
    countdown: Option<Countdown>,
    input: String,
    solved: bool,
    attempts: usize,
}

impl ConundrumRound {
    #[must_use]
    pub fn new(puzzle: ConundrumPuzzle, duration: Duration) -> Self {
        Self {
            puzzle,
            phase: Phase::Ready,
            duration,
            countdown: None,
            input: String::new(),
            solved: false,
            attempts: 0,
        }
    }

    /// Reveal the scramble and start the clock
    ///
    /// # Errors
    /// Fails outside `Ready`.
    pub fn start(&mut self, now: Instant) -> Result<(), RoundError> {
        expect_phase(self.phase, Phase::Ready)?;
        self.phase = Phase::Playing;
        self.countdown = Some(Countdown::start(self.duration, now));
        Ok(())
    }

    pub fn set_input(&mut self, input: &str) {
        if self.phase == Phase::Playing {
            self.input = input.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.phase == Phase::Playing && c.is_alphabetic() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.phase == Phase::Playing {
            self.input.pop();
        }
    }

    /// Check the typed guess
    ///
    /// A wrong guess clears the input and keeps the clock running.
    ///
    /// # Errors
    /// Fails outside `Playing`.
    pub fn guess(&mut self) -> Result<GuessOutcome, RoundError> {
        expect_phase(self.phase, Phase::Playing)?;
        if self.input.trim().is_empty() {
            return Ok(GuessOutcome::Empty);
        }

        self.attempts += 1;
        if self.puzzle.is_solved_by(&self.input) {
            self.solved = true;
            self.phase = Phase::Result;
            self.countdown = None;
            Ok(GuessOutcome::Correct)
        } else {
            self.input.clear();
            Ok(GuessOutcome::Incorrect)
        }
    }

    /// End the round unsolved once the clock runs out
    ///
    /// Returns `true` when this call ended the round.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.countdown.is_some_and(|c| c.is_expired(now));
        if expired {
            tracing::debug!(attempts = self.attempts, "conundrum clock expired");
            self.phase = Phase::Result;
            self.countdown = None;
        }
        expired
    }

    /// End the round unsolved at the player's request
    ///
    /// # Errors
    /// Fails outside `Playing`.
    pub fn give_up(&mut self) -> Result<(), RoundError> {
        expect_phase(self.phase, Phase::Playing)?;
        tracing::debug!(attempts = self.attempts, "conundrum abandoned");
        self.phase = Phase::Result;
        self.countdown = None;
        self.input.clear();
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn puzzle(&self) -> &ConundrumPuzzle {
        &self.puzzle
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub const fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Non-empty guesses made so far
    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        if self.solved { CONUNDRUM_SCORE } else { 0 }
    }
}
