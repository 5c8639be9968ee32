//! Numbers commands
//!
//! Solve a rack for a given target, generate a fresh target, or score an
//! expression the way the Numbers round would.

use crate::core::{NUMBER_RACK_SIZE, NumberRack};
use crate::round::{NumbersOutcome, judge};
use crate::solver::{Solution, TargetOrigin, find_solution, generate_solvable_target, normalize};
use anyhow::{Context, Result};
use rand::Rng;

/// Result of solving or generating a target
#[derive(Debug, Clone)]
pub struct NumbersReport {
    pub numbers: Vec<u32>,
    pub target: u64,
    /// Witness reaching the target, if the search found one
    pub solution: Option<Solution>,
    /// Set when the target was generated rather than given
    pub origin: Option<TargetOrigin>,
}

/// Result of scoring an expression
#[derive(Debug, Clone)]
pub struct EvalReport {
    pub numbers: Vec<u32>,
    pub target: u64,
    pub expression: String,
    pub outcome: NumbersOutcome,
}

/// Resolve the rack: explicit numbers are checked against the tile pools,
/// otherwise a rack is dealt with `large` large numbers
///
/// # Errors
///
/// Returns an error for numbers that no rack could hold or a large count
/// above four.
pub fn rack_numbers<R: Rng + ?Sized>(
    numbers: &[u32],
    large: usize,
    rng: &mut R,
) -> Result<Vec<u32>> {
    let rack = if numbers.is_empty() {
        NumberRack::deal(large, rng).context("Cannot deal a rack")?
    } else {
        NumberRack::from_numbers(numbers).context("Invalid numbers")?
    };
    Ok(rack.numbers().to_vec())
}

/// Find a witness for `target`, or generate a reachable target when none is given
///
/// # Errors
///
/// Returns an error if a target must be generated from fewer than three
/// numbers.
pub fn solve_numbers<R: Rng + ?Sized>(
    numbers: Vec<u32>,
    target: Option<u64>,
    rng: &mut R,
) -> Result<NumbersReport> {
    if let Some(target) = target {
        let solution = find_solution(&numbers, target);
        return Ok(NumbersReport {
            numbers,
            target,
            solution,
            origin: None,
        });
    }

    let generated = generate_solvable_target(&numbers, rng).context("Cannot generate a target")?;
    Ok(NumbersReport {
        numbers,
        target: generated.value,
        solution: Some(generated.solution),
        origin: Some(generated.origin),
    })
}

/// Score `expression` against a complete rack and target
///
/// # Errors
///
/// Returns an error if the rack does not hold exactly six numbers.
pub fn score_expression(numbers: Vec<u32>, target: u64, expression: &str) -> Result<EvalReport> {
    if numbers.len() != NUMBER_RACK_SIZE {
        anyhow::bail!(
            "A Numbers round uses {NUMBER_RACK_SIZE} numbers, got {}",
            numbers.len()
        );
    }
    let outcome = judge(expression, &numbers, target);
    Ok(EvalReport {
        numbers,
        target,
        expression: normalize(expression),
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn explicit_target_is_solved() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = solve_numbers(vec![100, 75, 50, 25, 3, 6], Some(175), &mut rng).unwrap();
        assert_eq!(report.target, 175);
        assert!(report.origin.is_none());
        assert_eq!(report.solution.map(|s| s.value), Some(175));
    }

    #[test]
    fn unreachable_target_has_no_solution() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = solve_numbers(vec![1, 1, 2, 2, 3, 3], Some(999), &mut rng).unwrap();
        assert!(report.solution.is_none());
    }

    #[test]
    fn generated_target_carries_witness() {
        let mut rng = StdRng::seed_from_u64(7);
        let report = solve_numbers(vec![2, 3, 4, 5, 6, 7], None, &mut rng).unwrap();
        let solution = report.solution.unwrap();
        assert_eq!(solution.value, report.target);
        assert!(report.origin.is_some());
    }

    #[test]
    fn dealt_rack_is_complete() {
        let mut rng = StdRng::seed_from_u64(3);
        let numbers = rack_numbers(&[], 2, &mut rng).unwrap();
        assert_eq!(numbers.len(), NUMBER_RACK_SIZE);
        assert_eq!(numbers.iter().filter(|&&n| n > 10).count(), 2);
    }

    #[test]
    fn impossible_rack_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(rack_numbers(&[100, 100], 0, &mut rng).is_err());
        assert!(rack_numbers(&[], 5, &mut rng).is_err());
    }

    #[test]
    fn expression_scores_like_the_round() {
        let report = score_expression(vec![2, 3, 4, 5, 6, 7], 100, "(7+3)*(6+4)").unwrap();
        assert_eq!(report.outcome.score(), 10);
        assert_eq!(report.expression, "(7+3)*(6+4)");

        let report = score_expression(vec![5, 1, 2, 3, 4, 6], 10, "5+5").unwrap();
        assert_eq!(report.outcome, NumbersOutcome::UnavailableNumbers);
    }

    #[test]
    fn eval_needs_full_rack() {
        assert!(score_expression(vec![5, 5], 10, "5+5").is_err());
    }
}
