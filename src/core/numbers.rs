//! Numbers round rack
//!
//! Six tiles drawn from four large numbers (one of each) and twenty small
//! numbers (two each of 1 to 10).

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// Number of tiles in a complete rack
pub const NUMBER_RACK_SIZE: usize = 6;

/// The large tiles, one of each per round
pub const LARGE_NUMBERS: [u32; 4] = [25, 50, 75, 100];

/// Maximum number of large tiles in a rack
pub const MAX_LARGE: usize = 4;

/// Copies of each small value (1 to 10)
pub const SMALL_COPIES: usize = 2;

/// Error type for invalid number rack operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    Full,
    LargeQuota,
    Unavailable(u32),
    TooManyNumbers(usize),
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "Rack already holds {NUMBER_RACK_SIZE} numbers"),
            Self::LargeQuota => write!(f, "Maximum {MAX_LARGE} large numbers allowed!"),
            Self::Unavailable(n) => write!(f, "No {n} tile left to draw"),
            Self::TooManyNumbers(n) => {
                write!(f, "A rack holds {NUMBER_RACK_SIZE} numbers, got {n}")
            }
        }
    }
}

impl std::error::Error for NumberError {}

/// Check whether a value is one of the large tiles
#[inline]
#[must_use]
pub fn is_large(n: u32) -> bool {
    LARGE_NUMBERS.contains(&n)
}

#[inline]
const fn is_small(n: u32) -> bool {
    n >= 1 && n <= 10
}

/// The numbers drawn for one Numbers round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberRack {
    numbers: Vec<u32>,
}

impl NumberRack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a complete rack with `large_count` large numbers
    ///
    /// Large and small pools are shuffled, the required tiles taken from each,
    /// and the result shuffled again.
    ///
    /// # Errors
    /// Returns `NumberError::LargeQuota` if `large_count` exceeds four.
    pub fn deal<R: Rng + ?Sized>(large_count: usize, rng: &mut R) -> Result<Self, NumberError> {
        if large_count > MAX_LARGE {
            return Err(NumberError::LargeQuota);
        }

        let mut large = LARGE_NUMBERS.to_vec();
        large.shuffle(rng);
        let mut small = small_pool();
        small.shuffle(rng);

        let mut numbers: Vec<u32> = large
            .into_iter()
            .take(large_count)
            .chain(small.into_iter().take(NUMBER_RACK_SIZE - large_count))
            .collect();
        numbers.shuffle(rng);

        Ok(Self { numbers })
    }

    /// Build a rack from explicit numbers
    ///
    /// # Errors
    /// Fails if there are more than six numbers or a value is not an available
    /// tile (a repeated large number, a third copy of a small one, or any
    /// value outside the two pools).
    ///
    /// # Examples
    /// ```
    /// use countdown::core::NumberRack;
    ///
    /// let rack = NumberRack::from_numbers(&[100, 75, 50, 25, 3, 6]).unwrap();
    /// assert!(rack.is_complete());
    /// assert!(NumberRack::from_numbers(&[100, 100]).is_err());
    /// ```
    pub fn from_numbers(numbers: &[u32]) -> Result<Self, NumberError> {
        if numbers.len() > NUMBER_RACK_SIZE {
            return Err(NumberError::TooManyNumbers(numbers.len()));
        }
        let mut rack = Self::new();
        for &n in numbers {
            rack.push(n)?;
        }
        Ok(rack)
    }

    /// Add a specific tile
    ///
    /// # Errors
    /// Fails if the rack is full or no such tile remains.
    pub fn push(&mut self, n: u32) -> Result<(), NumberError> {
        if self.is_complete() {
            return Err(NumberError::Full);
        }
        if is_large(n) {
            if self.large_count() >= MAX_LARGE {
                return Err(NumberError::LargeQuota);
            }
            if self.numbers.contains(&n) {
                return Err(NumberError::Unavailable(n));
            }
        } else if !is_small(n) || self.count_of(n) >= SMALL_COPIES {
            return Err(NumberError::Unavailable(n));
        }
        self.numbers.push(n);
        Ok(())
    }

    /// Draw one of the large numbers not yet on the rack
    ///
    /// # Errors
    /// Fails if the rack is full or all four large numbers are already drawn.
    pub fn draw_large<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u32, NumberError> {
        if self.is_complete() {
            return Err(NumberError::Full);
        }
        let remaining: Vec<u32> = LARGE_NUMBERS
            .into_iter()
            .filter(|n| !self.numbers.contains(n))
            .collect();
        if remaining.is_empty() {
            return Err(NumberError::LargeQuota);
        }
        let n = remaining[rng.random_range(0..remaining.len())];
        self.push(n)?;
        Ok(n)
    }

    /// Draw one of the remaining small tiles
    ///
    /// # Errors
    /// Fails if the rack is full.
    pub fn draw_small<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u32, NumberError> {
        if self.is_complete() {
            return Err(NumberError::Full);
        }
        let remaining: Vec<u32> = (1..=10u32)
            .flat_map(|n| {
                let left = SMALL_COPIES.saturating_sub(self.count_of(n));
                std::iter::repeat_n(n, left)
            })
            .collect();
        let n = remaining[rng.random_range(0..remaining.len())];
        self.push(n)?;
        Ok(n)
    }

    fn count_of(&self, n: u32) -> usize {
        self.numbers.iter().filter(|&&x| x == n).count()
    }

    #[inline]
    #[must_use]
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.numbers.len() >= NUMBER_RACK_SIZE
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        NUMBER_RACK_SIZE.saturating_sub(self.numbers.len())
    }

    #[must_use]
    pub fn large_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| is_large(n)).count()
    }
}

impl fmt::Display for NumberRack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.numbers.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join(" "))
    }
}

fn small_pool() -> Vec<u32> {
    (1..=10u32)
        .flat_map(|n| std::iter::repeat_n(n, SMALL_COPIES))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn deal_respects_large_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for large in 0..=MAX_LARGE {
            let rack = NumberRack::deal(large, &mut rng).unwrap();
            assert_eq!(rack.len(), NUMBER_RACK_SIZE);
            assert_eq!(rack.large_count(), large);
            // The dealt rack must itself be a valid rack
            assert!(NumberRack::from_numbers(rack.numbers()).is_ok());
        }
    }

    #[test]
    fn deal_rejects_five_large() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(NumberRack::deal(5, &mut rng), Err(NumberError::LargeQuota));
    }

    #[test]
    fn from_numbers_accepts_pairs_of_small() {
        let rack = NumberRack::from_numbers(&[1, 1, 2, 2, 3, 3]).unwrap();
        assert!(rack.is_complete());
    }

    #[test]
    fn from_numbers_rejects_third_copy() {
        assert_eq!(
            NumberRack::from_numbers(&[5, 5, 5]),
            Err(NumberError::Unavailable(5))
        );
    }

    #[test]
    fn from_numbers_rejects_repeated_large() {
        assert_eq!(
            NumberRack::from_numbers(&[100, 100]),
            Err(NumberError::Unavailable(100))
        );
    }

    #[test]
    fn from_numbers_rejects_off_pool_values() {
        assert_eq!(
            NumberRack::from_numbers(&[0]),
            Err(NumberError::Unavailable(0))
        );
        assert_eq!(
            NumberRack::from_numbers(&[11]),
            Err(NumberError::Unavailable(11))
        );
    }

    #[test]
    fn from_numbers_rejects_seven() {
        assert_eq!(
            NumberRack::from_numbers(&[1, 2, 3, 4, 5, 6, 7]),
            Err(NumberError::TooManyNumbers(7))
        );
    }

    #[test]
    fn draw_large_until_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rack = NumberRack::new();
        for _ in 0..MAX_LARGE {
            rack.draw_large(&mut rng).unwrap();
        }
        let mut drawn = rack.numbers().to_vec();
        drawn.sort_unstable();
        assert_eq!(drawn, LARGE_NUMBERS.to_vec());
        assert_eq!(rack.draw_large(&mut rng), Err(NumberError::LargeQuota));
    }

    #[test]
    fn draw_small_fills_rack() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut rack = NumberRack::new();
        for _ in 0..NUMBER_RACK_SIZE {
            let n = rack.draw_small(&mut rng).unwrap();
            assert!((1..=10).contains(&n));
        }
        assert!(rack.is_complete());
        assert_eq!(rack.draw_small(&mut rng), Err(NumberError::Full));
    }

    #[test]
    fn display_joins_with_spaces() {
        let rack = NumberRack::from_numbers(&[100, 7, 3]).unwrap();
        assert_eq!(rack.to_string(), "100 7 3");
    }
}
