//! Reference values to check the engine against.
//!
//! The table is built with plain repeated addition, so it shares nothing with
//! the matrix code beyond [`U256`] addition itself.
use anyhow::{bail, Result};
use itertools::izip;

use crate::fibonacci::MAX_FIBONACCI_INDEX;
use crate::uint256::U256;

/// First index at which computed values disagree with the reference table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Mismatch {
    pub index: u32,
    pub expected: U256,
    pub actual: U256,
}

/// `F(0)..=F(MAX_FIBONACCI_INDEX)`, reduced modulo 2^256.
#[must_use]
pub fn reference_table() -> Vec<U256> {
    let mut table = Vec::with_capacity(MAX_FIBONACCI_INDEX as usize + 1);
    table.extend([U256::ZERO, U256::ONE]);
    for i in 2..=MAX_FIBONACCI_INDEX as usize {
        let next = table[i - 1] + table[i - 2];
        table.push(next);
    }
    table
}

/// Compares `results[k]` against `F(start + k)`.
///
/// Values past [`MAX_FIBONACCI_INDEX`] have no reference and count as
/// mismatches against zero.
#[must_use]
pub fn first_mismatch(results: &[U256], start: u32) -> Option<Mismatch> {
    let table = reference_table();
    let expected = table.into_iter().skip(start as usize).chain(std::iter::repeat(U256::ZERO));
    izip!(start.., results, expected)
        .find(|(index, actual, expected)| {
            **actual != *expected || *index > MAX_FIBONACCI_INDEX
        })
        .map(|(index, &actual, expected)| Mismatch {
            index,
            expected,
            actual,
        })
}

/// Checks `results` against the reference table, see [`first_mismatch`].
///
/// # Errors
///
/// Errors with the first mismatching index and both values.
pub fn verify(results: &[U256], start: u32) -> Result<()> {
    if let Some(Mismatch {
        index,
        expected,
        actual,
    }) = first_mismatch(results, start)
    {
        bail!("Mismatch at index {index}: expected {expected}, got {actual}");
    }
    log::debug!(
        "{} Fibonacci numbers from index {start} match the reference table",
        results.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fibonacci::{fibonacci_range, MAX_64_BIT_FIBONACCI_INDEX};

    #[test]
    fn table_starts_like_fibonacci() {
        let table = reference_table();
        assert_eq!(table.len(), 375);
        let small: Vec<U256> = [0_u64, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55]
            .into_iter()
            .map(U256::from)
            .collect();
        assert_eq!(table[..=10], small[..]);
        assert_eq!(
            table[MAX_64_BIT_FIBONACCI_INDEX as usize],
            U256::from(7_540_113_804_746_346_429_u64)
        );
    }

    #[test]
    fn engine_matches_reference() {
        let results = fibonacci_range(0, MAX_FIBONACCI_INDEX);
        assert_eq!(first_mismatch(&results, 0), None);
        verify(&results, 0).unwrap();
    }

    #[test]
    fn offset_ranges_are_aligned() {
        let results = fibonacci_range(100, 120);
        assert_eq!(first_mismatch(&results, 100), None);
        assert!(first_mismatch(&results, 99).is_some());
    }

    #[test]
    fn reports_first_mismatch_only() {
        let mut results = fibonacci_range(0, 20);
        results[7] = U256::from(1_u64);
        results[12] = U256::ZERO;
        assert_eq!(
            first_mismatch(&results, 0),
            Some(Mismatch {
                index: 7,
                expected: U256::from(13_u64),
                actual: U256::from(1_u64),
            })
        );
        let err = verify(&results, 0).unwrap_err();
        assert_eq!(err.to_string(), "Mismatch at index 7: expected 13, got 1");
    }

    #[test]
    fn values_past_the_table_are_mismatches() {
        let results = vec![U256::ZERO; 3];
        assert_eq!(
            first_mismatch(&results, MAX_FIBONACCI_INDEX + 1).map(|m| m.index),
            Some(MAX_FIBONACCI_INDEX + 1)
        );
    }

    #[test]
    fn empty_results_match() {
        assert_eq!(first_mismatch(&[], 0), None);
    }
}
