//! Countdown solving algorithms
//!
//! Target search and expression evaluation for the Numbers round, longest word
//! search for the Letters round, and conundrum scrambling.

mod conundrum;
pub mod expression;
mod longest;
pub mod target;

pub use conundrum::{
    CONUNDRUM_LENGTH, ConundrumError, ConundrumPuzzle, is_conundrum_answer, scramble_word,
};
pub use expression::{ExpressionError, evaluate, normalize, validate_numbers_used};
pub use longest::find_longest_word;
pub use target::{
    Expr, Operator, Solution, Step, TARGET_RANGE, Target, TargetError, TargetOrigin,
    find_solution, generate_solvable_target,
};
