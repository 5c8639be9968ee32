//! Numbers round

use super::{Countdown, Phase, RoundError, expect_phase};
use crate::core::{NumberRack, numbers_score};
use crate::solver::{ExpressionError, Target, evaluate, generate_solvable_target, validate_numbers_used};
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

/// How a Numbers round ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumbersOutcome {
    /// Nothing was entered
    Empty,
    /// The expression uses numbers that were not drawn
    UnavailableNumbers,
    /// The expression could not be evaluated
    Invalid(ExpressionError),
    /// The expression evaluated to `value`
    Scored { value: i64, difference: u64, score: u32 },
}

impl NumbersOutcome {
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::Scored { score, .. } => *score,
            _ => 0,
        }
    }
}

impl fmt::Display for NumbersOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No answer submitted"),
            Self::UnavailableNumbers => write!(f, "You can only use the available numbers!"),
            Self::Invalid(e) => write!(f, "Invalid expression: {e}"),
            Self::Scored {
                value, difference, ..
            } => match difference {
                0 => write!(f, "Exact answer! {value}"),
                1..=5 => write!(f, "Within 5! You got {value}"),
                6..=10 => write!(f, "Within 10! You got {value}"),
                _ => write!(f, "{value} is too far from the target"),
            },
        }
    }
}

/// Score an expression against a target
///
/// Checks run in order: empty input, numbers not on the rack, then
/// evaluation. Any failure scores zero.
///
/// # Examples
/// ```
/// use countdown::round::{NumbersOutcome, judge};
///
/// let outcome = judge("(4 + 6) * 10", &[2, 3, 4, 5, 6, 10], 100);
/// assert_eq!(outcome.score(), 10);
/// assert_eq!(judge("5 + 5", &[5, 10], 10), NumbersOutcome::UnavailableNumbers);
/// ```
#[must_use]
pub fn judge(expr: &str, available: &[u32], target: u64) -> NumbersOutcome {
    if expr.trim().is_empty() {
        return NumbersOutcome::Empty;
    }
    if !validate_numbers_used(expr, available) {
        return NumbersOutcome::UnavailableNumbers;
    }
    match evaluate(expr) {
        Ok(value) => {
            let target = i64::try_from(target).unwrap_or(i64::MAX);
            NumbersOutcome::Scored {
                value,
                difference: target.abs_diff(value),
                score: numbers_score(target, value),
            }
        }
        Err(e) => NumbersOutcome::Invalid(e),
    }
}

#[derive(Debug, Clone)]
pub struct NumbersRound {
    rack: NumberRack,
    phase: Phase,
    duration: Duration,
    countdown: Option<Countdown>,
    target: Option<Target>,
    input: String,
    outcome: Option<NumbersOutcome>,
}

impl NumbersRound {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            rack: NumberRack::new(),
            phase: Phase::Picking,
            duration,
            countdown: None,
            target: None,
            input: String::new(),
            outcome: None,
        }
    }

    /// Draw a large number
    ///
    /// # Errors
    /// Fails outside `Picking` or when no large number is left.
    pub fn draw_large<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Instant,
    ) -> Result<u32, RoundError> {
        expect_phase(self.phase, Phase::Picking)?;
        let n = self.rack.draw_large(rng)?;
        self.after_draw(rng, now)?;
        Ok(n)
    }

    /// Draw a small number
    ///
    /// # Errors
    /// Fails outside `Picking`.
    pub fn draw_small<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Instant,
    ) -> Result<u32, RoundError> {
        expect_phase(self.phase, Phase::Picking)?;
        let n = self.rack.draw_small(rng)?;
        self.after_draw(rng, now)?;
        Ok(n)
    }

    /// Once six numbers are drawn, set a target and start the clock
    fn after_draw<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Result<(), RoundError> {
        if self.rack.is_complete() {
            let target = generate_solvable_target(self.rack.numbers(), rng)?;
            tracing::debug!(
                numbers = %self.rack,
                target = target.value,
                origin = ?target.origin,
                "numbers target set"
            );
            self.target = Some(target);
            self.phase = Phase::Playing;
            self.countdown = Some(Countdown::start(self.duration, now));
        }
        Ok(())
    }

    /// Replace the expression being typed; ignored outside `Playing`
    pub fn set_input(&mut self, input: &str) {
        if self.phase == Phase::Playing {
            self.input = input.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.phase == Phase::Playing {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.phase == Phase::Playing {
            self.input.pop();
        }
    }

    /// Score the typed expression and stop the clock
    ///
    /// # Errors
    /// Fails outside `Playing`.
    pub fn submit(&mut self) -> Result<&NumbersOutcome, RoundError> {
        expect_phase(self.phase, Phase::Playing)?;
        let target = self.target.as_ref().map_or(0, |t| t.value);
        let outcome = judge(&self.input, self.rack.numbers(), target);

        self.phase = Phase::Result;
        self.countdown = None;
        Ok(self.outcome.insert(outcome))
    }

    /// Submit automatically once the clock runs out
    pub fn tick(&mut self, now: Instant) -> Option<&NumbersOutcome> {
        let expired = self.countdown.is_some_and(|c| c.is_expired(now));
        if expired {
            tracing::debug!("numbers clock expired");
            self.submit().ok()
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn rack(&self) -> &NumberRack {
        &self.rack
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

    /// The target with its witness, set once the rack is complete
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Option<&NumbersOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.outcome.as_ref().map_or(0, NumbersOutcome::score)
    }
}
