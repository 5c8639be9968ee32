//! Round state machines and the game that sequences them
//!
//! Letters and Numbers rounds move `Picking → Playing → Result` (Letters passes
//! through `Checking` while a dictionary lookup runs). The Conundrum moves
//! `Ready → Playing → Result`. Leaving `Playing` always drops the countdown, so
//! a late expiry has nothing to fire.

mod conundrum;
mod countdown;
mod game;
mod letters;
mod numbers;

pub use conundrum::{ConundrumRound, GuessOutcome};
pub use countdown::{Countdown, WARNING_THRESHOLD};
pub use game::{ActiveRound, Game, ROUND_SCHEDULE, RoundKind, TOTAL_ROUNDS};
pub use letters::{LettersOutcome, LettersRound, Submission};
pub use numbers::{NumbersOutcome, NumbersRound, judge};

use crate::core::{NumberError, RackError};
use crate::solver::{ConundrumError, TargetError};
use std::fmt;

/// Where a round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Tiles are being drawn
    Picking,
    /// Conundrum shown but the clock has not started
    Ready,
    /// Clock running, answers accepted
    Playing,
    /// Waiting on a dictionary lookup
    Checking,
    /// Round scored
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Picking => "picking",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Checking => "checking",
            Self::Result => "result",
        };
        f.write_str(name)
    }
}

/// Error type for actions a round cannot take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    WrongPhase { expected: Phase, actual: Phase },
    Rack(RackError),
    Numbers(NumberError),
    Target(TargetError),
    Conundrum(ConundrumError),
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongPhase { expected, actual } => {
                write!(f, "Round is {actual}, expected {expected}")
            }
            Self::Rack(e) => write!(f, "{e}"),
            Self::Numbers(e) => write!(f, "{e}"),
            Self::Target(e) => write!(f, "{e}"),
            Self::Conundrum(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RoundError {}

impl From<RackError> for RoundError {
    fn from(e: RackError) -> Self {
        Self::Rack(e)
    }
}

impl From<NumberError> for RoundError {
    fn from(e: NumberError) -> Self {
        Self::Numbers(e)
    }
}

impl From<TargetError> for RoundError {
    fn from(e: TargetError) -> Self {
        Self::Target(e)
    }
}

impl From<ConundrumError> for RoundError {
    fn from(e: ConundrumError) -> Self {
        Self::Conundrum(e)
    }
}

/// Fail unless `actual` is `expected`
fn expect_phase(actual: Phase, expected: Phase) -> Result<(), RoundError> {
    if actual == expected {
        Ok(())
    } else {
        Err(RoundError::WrongPhase { expected, actual })
    }
}
