//! Fibonacci numbers over [`U256`] by matrix exponentiation.
//!
//! Every function here is a pure function of its arguments, so calls may run
//! concurrently from any number of threads.
use itertools::Itertools;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::matrix::Matrix2x2;
use crate::uint256::U256;

/// Largest `n` whose Fibonacci number fits in an `i64`. `F(93)` still fits in
/// a `u64`, `F(94)` does not.
pub const MAX_64_BIT_FIBONACCI_INDEX: u32 = 92;
/// Largest `n` whose Fibonacci number fits in a [`U256`] exactly.
pub const MAX_EXACT_FIBONACCI_INDEX: u32 = 370;
/// Largest index callers may ask for. `F(371)..=F(374)` are reduced modulo
/// 2^256, consistently with the reference table.
pub const MAX_FIBONACCI_INDEX: u32 = 374;

/// Computes `F(n)`, with `F(0) = 0` and `F(1) = 1`.
///
/// `F(n)` is the top-left entry of `Q^(n-1)`, computed with O(log n) matrix
/// products.
///
/// Callers must keep `n <= MAX_FIBONACCI_INDEX`. Past
/// [`MAX_EXACT_FIBONACCI_INDEX`] the result is `F(n) mod 2^256`.
#[must_use]
pub fn fibonacci(n: u32) -> U256 {
    debug_assert!(n <= MAX_FIBONACCI_INDEX, "index {n} is out of range");
    if n == 0 {
        return U256::ZERO;
    }
    Matrix2x2::FIBONACCI.pow(n - 1).a
}

/// Computes `F(start..=end)` in index order. Empty if `start > end`.
///
/// Each index is computed on its own, without reusing its neighbours, so the
/// work can be spread over threads. With the `parallel` feature it is.
#[must_use]
pub fn fibonacci_range(start: u32, end: u32) -> Vec<U256> {
    debug_assert!(end <= MAX_FIBONACCI_INDEX);
    log::trace!("fibonacci_range({start}, {end})");
    #[cfg(feature = "parallel")]
    let range = (start..=end).into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let range = start..=end;
    range.map(fibonacci).collect()
}

/// Computes `F(start..=end)` with the two-term recurrence in O(end) work.
///
/// Produces the same values as [`fibonacci_range`], including the empty
/// result for `start > end`.
#[must_use]
pub fn fibonacci_range_linear(start: u32, end: u32) -> Vec<U256> {
    debug_assert!(end <= MAX_FIBONACCI_INDEX);
    if start > end {
        return Vec::new();
    }
    itertools::iterate((U256::ZERO, U256::ONE), |&(prev, curr)| (curr, prev + curr))
        .map(|(prev, _)| prev)
        .dropping(start as usize)
        .take((end - start) as usize + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test_case(0, 0; "zero")]
    #[test_case(1, 1; "one")]
    #[test_case(2, 1; "two")]
    #[test_case(3, 2; "three")]
    #[test_case(10, 55; "ten")]
    #[test_case(40, 102_334_155; "forty")]
    #[test_case(MAX_64_BIT_FIBONACCI_INDEX, 7_540_113_804_746_346_429; "largest i64")]
    fn known_values(n: u32, expected: u64) {
        assert_eq!(fibonacci(n), U256::from(expected));
    }

    #[test]
    #[allow(clippy::cast_sign_loss)]
    fn sixty_four_bit_boundaries() {
        let n = MAX_64_BIT_FIBONACCI_INDEX;
        assert!(fibonacci(n) <= U256::from(i64::MAX as u64));
        assert!(fibonacci(n + 1) > U256::from(i64::MAX as u64));

        let f93 = fibonacci(n + 1);
        assert_eq!(f93.to_string(), "12200160415121876738");
        assert_eq!(f93, fibonacci_range_linear(n + 1, n + 1)[0]);
        assert!(f93 <= U256::from(u64::MAX));

        let f94 = fibonacci(n + 2);
        assert_eq!(f94.to_string(), "19740274219868223167");
        assert!(f94 > U256::from(u64::MAX));
    }

    #[test_case(1, 0; "just past")]
    #[test_case(5, 4; "small")]
    #[test_case(MAX_FIBONACCI_INDEX, 0; "whole table reversed")]
    fn reversed_range_is_empty(start: u32, end: u32) {
        assert!(fibonacci_range(start, end).is_empty());
        assert!(fibonacci_range_linear(start, end).is_empty());
    }

    #[test]
    fn largest_exact_index() {
        let n = MAX_EXACT_FIBONACCI_INDEX;
        assert_eq!(
            fibonacci(n).to_string(),
            "94611056096305838013295371573764256526437182762229865607320618320601813254535"
        );
        let (_, overflowed) = fibonacci(n).overflowing_add(fibonacci(n - 1));
        assert!(overflowed, "F({}) should not fit in 256 bits", n + 1);
    }

    #[test]
    fn largest_index_is_reduced() {
        // F(374) mod 2^256
        assert_eq!(
            fibonacci(MAX_FIBONACCI_INDEX).to_string(),
            "69513379432068071003183488036085143085059791157317041511100439305560609010377"
        );
    }

    #[test]
    fn recurrence_holds_everywhere() {
        for n in 2..=MAX_FIBONACCI_INDEX {
            assert_eq!(fibonacci(n), fibonacci(n - 1) + fibonacci(n - 2), "n = {n}");
        }
    }

    #[test_case(0; "only zero")]
    #[test_case(1; "zero and one")]
    #[test_case(MAX_64_BIT_FIBONACCI_INDEX; "u64 prefix")]
    #[test_case(MAX_FIBONACCI_INDEX; "everything")]
    fn prefix_range_matches_single_values(end: u32) {
        let range = fibonacci_range(0, end);
        assert_eq!(range.len(), end as usize + 1);
        for (i, value) in (0..).zip(&range) {
            assert_eq!(*value, fibonacci(i), "index {i}");
        }
        assert_eq!(range, fibonacci_range_linear(0, end));
    }

    proptest! {
        #[test]
        fn sub_ranges_agree(start in 0..=MAX_FIBONACCI_INDEX, len in 0_u32..50) {
            let end = (start + len).min(MAX_FIBONACCI_INDEX);
            let range = fibonacci_range(start, end);
            prop_assert_eq!(range.first().copied(), Some(fibonacci(start)));
            prop_assert_eq!(range.last().copied(), Some(fibonacci(end)));
            prop_assert_eq!(range, fibonacci_range_linear(start, end));
        }
    }
}
