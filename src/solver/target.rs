//! Numbers round target search
//!
//! Finds a witness expression reaching a target from the drawn numbers, and
//! generates targets that are known to be reachable.
//!
//! The search only considers left-deep chains `((a op b) op c) op d` over two,
//! three and then four distinct tiles. Every intermediate value must stay
//! positive and every division must be exact.

use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Range targets are drawn from
pub const TARGET_RANGE: RangeInclusive<u64> = 100..=999;

/// Random candidates tried before falling back to a constructed target
pub const MAX_TARGET_ATTEMPTS: usize = 100;

/// Largest chain the search will build
pub const MAX_OPERANDS: usize = 4;

/// Minimum tiles needed to build a fallback target
pub const MIN_NUMBERS: usize = 3;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in search order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Apply the operator under the game rules
    ///
    /// Subtraction must leave a positive result and division must be exact;
    /// otherwise `None`.
    #[inline]
    #[must_use]
    pub const fn apply(self, a: u64, b: u64) -> Option<u64> {
        match self {
            Self::Add => a.checked_add(b),
            Self::Subtract => {
                if a > b {
                    Some(a - b)
                } else {
                    None
                }
            }
            Self::Multiply => a.checked_mul(b),
            Self::Divide => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }

    /// ASCII symbol, as accepted by the expression evaluator
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Arithmetic expression tree over drawn numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(u32),
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    #[must_use]
    pub fn binary(op: Operator, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate under the game rules
    ///
    /// Returns `None` if any subtraction is non-positive or any division inexact.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(u64::from(*n)),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.value()?, rhs.value()?),
        }
    }

    /// The numbers used, left to right
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        let mut out = Vec::new();
        self.collect_numbers(&mut out);
        out
    }

    fn collect_numbers(&self, out: &mut Vec<u32>) {
        match self {
            Self::Number(n) => out.push(*n),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_numbers(out);
                rhs.collect_numbers(out);
            }
        }
    }

    /// Each operation in evaluation order
    ///
    /// Returns `None` if the expression breaks the game rules.
    #[must_use]
    pub fn steps(&self) -> Option<Vec<Step>> {
        let mut steps = Vec::new();
        self.collect_steps(&mut steps)?;
        Some(steps)
    }

    fn collect_steps(&self, steps: &mut Vec<Step>) -> Option<u64> {
        match self {
            Self::Number(n) => Some(u64::from(*n)),
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.collect_steps(steps)?;
                let b = rhs.collect_steps(steps)?;
                let result = op.apply(a, b)?;
                steps.push(Step {
                    lhs: a,
                    op: *op,
                    rhs: b,
                    result,
                });
                Some(result)
            }
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, outermost: bool) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Binary { op, lhs, rhs } => {
                if !outermost {
                    write!(f, "(")?;
                }
                lhs.fmt_nested(f, false)?;
                write!(f, " {op} ")?;
                rhs.fmt_nested(f, false)?;
                if !outermost {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expr {
    /// Fully parenthesized, without brackets around the outermost operation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, true)
    }
}

/// One operation of a solution: `lhs op rhs = result`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub lhs: u64,
    pub op: Operator,
    pub rhs: u64,
    pub result: u64,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.lhs, self.op, self.rhs, self.result)
    }
}

/// A witness expression and the value it reaches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub expr: Expr,
    pub value: u64,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expr, self.value)
    }
}

/// How a target was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOrigin {
    /// Random candidate certified by the search after this many attempts
    Searched { attempts: usize },
    /// Built from the largest numbers after every random candidate failed
    Fallback,
}

/// A Numbers round target together with its witness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub value: u64,
    pub solution: Solution,
    pub origin: TargetOrigin,
}

/// Error type for target generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    TooFewNumbers(usize),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNumbers(n) => write!(
                f,
                "Need at least {MIN_NUMBERS} numbers to generate a target, got {n}"
            ),
        }
    }
}

impl std::error::Error for TargetError {}

/// Find a witness reaching `target`, preferring chains over fewer numbers
///
/// Returns `None` when no chain of two to four numbers reaches the target.
///
/// # Examples
/// ```
/// use countdown::solver::find_solution;
///
/// let solution = find_solution(&[100, 75, 50, 25, 3, 6], 175).unwrap();
/// assert_eq!(solution.to_string(), "100 + 75 = 175");
/// assert!(find_solution(&[1, 1, 1, 1, 1, 1], 999).is_none());
/// ```
#[must_use]
pub fn find_solution(numbers: &[u32], target: u64) -> Option<Solution> {
    let mut used = vec![false; numbers.len()];
    let mut chain = Vec::with_capacity(MAX_OPERANDS);

    for operands in 2..=MAX_OPERANDS.min(numbers.len()) {
        for (first, &n) in numbers.iter().enumerate() {
            used[first] = true;
            let found = extend_chain(
                numbers,
                target,
                u64::from(n),
                operands - 1,
                &mut used,
                &mut chain,
            );
            used[first] = false;

            if found {
                let expr = chain.iter().fold(Expr::Number(n), |acc, &(index, op)| {
                    Expr::binary(op, acc, Expr::Number(numbers[index]))
                });
                return Some(Solution {
                    expr,
                    value: target,
                });
            }
        }
    }

    None
}

/// Depth-first extension of a left-deep chain
///
/// On success `chain` holds the `(tile index, operator)` pairs after the first
/// tile; on failure it is left empty.
fn extend_chain(
    numbers: &[u32],
    target: u64,
    acc: u64,
    remaining: usize,
    used: &mut [bool],
    chain: &mut Vec<(usize, Operator)>,
) -> bool {
    for next in 0..numbers.len() {
        if used[next] {
            continue;
        }
        let operand = u64::from(numbers[next]);

        for op in Operator::ALL {
            let Some(result) = op.apply(acc, operand) else {
                continue;
            };

            chain.push((next, op));
            if remaining == 1 {
                if result == target {
                    return true;
                }
            } else {
                used[next] = true;
                let found = extend_chain(numbers, target, result, remaining - 1, used, chain);
                used[next] = false;
                if found {
                    return true;
                }
            }
            chain.pop();
        }
    }

    false
}

/// Generate a target in [`TARGET_RANGE`] that the search can reach
///
/// Tries up to [`MAX_TARGET_ATTEMPTS`] random targets. If none is reachable,
/// falls back to the product of the two largest numbers when that product is
/// in range, and otherwise to the sum of the three largest, whatever its value.
///
/// # Errors
/// Returns `TargetError::TooFewNumbers` for fewer than three numbers.
pub fn generate_solvable_target<R: Rng + ?Sized>(
    numbers: &[u32],
    rng: &mut R,
) -> Result<Target, TargetError> {
    if numbers.len() < MIN_NUMBERS {
        return Err(TargetError::TooFewNumbers(numbers.len()));
    }

    for attempt in 1..=MAX_TARGET_ATTEMPTS {
        let candidate = rng.random_range(TARGET_RANGE);
        if let Some(solution) = find_solution(numbers, candidate) {
            return Ok(Target {
                value: candidate,
                solution,
                origin: TargetOrigin::Searched { attempts: attempt },
            });
        }
    }

    tracing::debug!(?numbers, "no random target reachable, using fallback");
    Ok(fallback_target(numbers))
}

/// Target built directly from the largest numbers
///
/// Callers guarantee at least three numbers.
fn fallback_target(numbers: &[u32]) -> Target {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let (a, b, c) = (sorted[0], sorted[1], sorted[2]);

    let product = u64::from(a) * u64::from(b);
    let expr = if TARGET_RANGE.contains(&product) {
        Expr::binary(Operator::Multiply, Expr::Number(a), Expr::Number(b))
    } else {
        Expr::binary(
            Operator::Add,
            Expr::binary(Operator::Add, Expr::Number(a), Expr::Number(b)),
            Expr::Number(c),
        )
    };
    let value = if TARGET_RANGE.contains(&product) {
        product
    } else {
        u64::from(a) + u64::from(b) + u64::from(c)
    };

    Target {
        value,
        solution: Solution { expr, value },
        origin: TargetOrigin::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::expression::{evaluate, validate_numbers_used};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_witness(numbers: &[u32], target: u64, solution: &Solution) {
        assert_eq!(solution.value, target);
        assert_eq!(solution.expr.value(), Some(target));

        // Every step stays positive and exact
        let steps = solution.expr.steps().unwrap();
        for step in &steps {
            assert!(step.result > 0);
            if step.op == Operator::Divide {
                assert_eq!(step.lhs % step.rhs, 0);
            }
        }

        // The rendered witness is a valid player expression
        let rendered = solution.expr.to_string();
        assert_eq!(evaluate(&rendered), Ok(target as i64));
        assert!(validate_numbers_used(&rendered, numbers));
    }

    #[test]
    fn operator_rules() {
        assert_eq!(Operator::Add.apply(3, 4), Some(7));
        assert_eq!(Operator::Subtract.apply(7, 3), Some(4));
        assert_eq!(Operator::Subtract.apply(3, 3), None);
        assert_eq!(Operator::Subtract.apply(3, 7), None);
        assert_eq!(Operator::Multiply.apply(6, 7), Some(42));
        assert_eq!(Operator::Divide.apply(12, 4), Some(3));
        assert_eq!(Operator::Divide.apply(12, 5), None);
        assert_eq!(Operator::Divide.apply(12, 0), None);
    }

    #[test]
    fn two_number_solution() {
        let numbers = [100, 75, 50, 25, 3, 6];
        let solution = find_solution(&numbers, 175).unwrap();
        assert_eq!(solution.expr.numbers().len(), 2);
        assert_witness(&numbers, 175, &solution);
    }

    #[test]
    fn prefers_fewer_numbers() {
        // 100 * 6 = 600 beats any longer chain
        let numbers = [1, 2, 3, 4, 100, 6];
        let solution = find_solution(&numbers, 600).unwrap();
        assert_eq!(solution.expr.numbers(), vec![100, 6]);
    }

    #[test]
    fn first_match_in_search_order() {
        // (1 + 2) first appears before (2 + 1)
        let numbers = [1, 2, 50, 75, 9, 10];
        let solution = find_solution(&numbers, 103).unwrap();
        assert_witness(&numbers, 103, &solution);
    }

    #[test]
    fn three_number_solution() {
        let numbers = [2, 3, 4, 5, 6, 7];
        // No pair reaches 100 but (4 * 5) * 5 is not allowed (one 5),
        // so the search must find some other chain of three or four
        let solution = find_solution(&numbers, 100).unwrap();
        assert!(solution.expr.numbers().len() >= 3);
        assert_witness(&numbers, 100, &solution);
    }

    #[test]
    fn four_number_solution() {
        let numbers = [1, 1, 2, 2, 3, 3];
        // Largest three-chain is (3 * 3) * 2 = 18; 36 needs four numbers
        let solution = find_solution(&numbers, 36).unwrap();
        assert_eq!(solution.expr.numbers().len(), 4);
        assert_witness(&numbers, 36, &solution);
    }

    #[test]
    fn duplicate_values_are_distinct_tiles() {
        let numbers = [5, 5, 1, 1, 2, 2];
        let solution = find_solution(&numbers, 25).unwrap();
        assert_eq!(solution.expr.numbers(), vec![5, 5]);
        assert_witness(&numbers, 25, &solution);
    }

    #[test]
    fn single_tile_never_reused() {
        // Only one 10: 10 * 10 is not allowed
        let numbers = [10, 1];
        assert!(find_solution(&numbers, 100).is_none());
    }

    #[test]
    fn unreachable_target() {
        assert!(find_solution(&[1, 1, 2, 2, 3, 3], 999).is_none());
    }

    #[test]
    fn witness_property_over_many_targets() {
        let numbers = [100, 75, 50, 25, 3, 6];
        let mut found = 0;
        for target in (100..=999).step_by(37) {
            if let Some(solution) = find_solution(&numbers, target) {
                assert_witness(&numbers, target, &solution);
                found += 1;
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let expr = Expr::binary(
            Operator::Subtract,
            Expr::binary(
                Operator::Multiply,
                Expr::binary(Operator::Add, Expr::Number(100), Expr::Number(75)),
                Expr::Number(6),
            ),
            Expr::Number(50),
        );
        assert_eq!(expr.to_string(), "((100 + 75) * 6) - 50");
        assert_eq!(expr.value(), Some(1000));
    }

    #[test]
    fn steps_in_evaluation_order() {
        let expr = Expr::binary(
            Operator::Multiply,
            Expr::binary(Operator::Add, Expr::Number(4), Expr::Number(6)),
            Expr::Number(10),
        );
        let steps: Vec<String> = expr.steps().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(steps, vec!["4 + 6 = 10", "10 * 10 = 100"]);
    }

    #[test]
    fn generated_target_is_certified() {
        let mut rng = StdRng::seed_from_u64(2024);
        let numbers = [100, 75, 50, 25, 3, 6];
        let target = generate_solvable_target(&numbers, &mut rng).unwrap();

        assert!(matches!(target.origin, TargetOrigin::Searched { .. }));
        assert!(TARGET_RANGE.contains(&target.value));
        assert_witness(&numbers, target.value, &target.solution);
    }

    #[test]
    fn fallback_uses_product_when_in_range() {
        // Nothing reaches 100..=999 except via the product of the two largest
        let target = fallback_target(&[1, 1, 2, 2, 10, 10]);
        assert_eq!(target.origin, TargetOrigin::Fallback);
        assert_eq!(target.value, 100);
        assert_eq!(target.solution.expr.to_string(), "10 * 10");
    }

    #[test]
    fn fallback_uses_sum_when_product_out_of_range() {
        // 100 * 75 = 7500 is out of range
        let target = fallback_target(&[100, 75, 50, 1, 1, 2]);
        assert_eq!(target.value, 225);
        assert_eq!(target.solution.expr.to_string(), "(100 + 75) + 50");
    }

    #[test]
    fn fallback_sum_may_leave_range() {
        let target = fallback_target(&[1, 1, 2, 2, 3, 3]);
        assert_eq!(target.value, 8);
        assert!(!TARGET_RANGE.contains(&target.value));
    }

    #[test]
    fn small_rack_falls_back() {
        // Largest reachable value is 3 * 3 * 2 * 2 = 36, so every candidate fails
        let mut rng = StdRng::seed_from_u64(5);
        let target = generate_solvable_target(&[1, 1, 2, 2, 3, 3], &mut rng).unwrap();
        assert_eq!(target.origin, TargetOrigin::Fallback);
        assert_eq!(target.value, 8);
    }

    #[test]
    fn too_few_numbers_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            generate_solvable_target(&[10, 10], &mut rng),
            Err(TargetError::TooFewNumbers(2))
        );
    }
}
