//! 2x2 matrices over [`U256`], used to step the Fibonacci recurrence.
use core::ops::Mul;

use crate::uint256::U256;

/// `[[a, b], [c, d]]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matrix2x2 {
    pub a: U256,
    pub b: U256,
    pub c: U256,
    pub d: U256,
}

impl Matrix2x2 {
    /// `Q = [[1, 1], [1, 0]]`. `Q^n = [[F(n+1), F(n)], [F(n), F(n-1)]]`.
    pub const FIBONACCI: Self = Self {
        a: U256::ONE,
        b: U256::ONE,
        c: U256::ONE,
        d: U256::ZERO,
    };
    pub const IDENTITY: Self = Self {
        a: U256::ONE,
        b: U256::ZERO,
        c: U256::ZERO,
        d: U256::ONE,
    };

    #[must_use]
    pub fn square(self) -> Self { self * self }

    /// Power by recursive squaring: `M^p = (M^(p/2))^2 * M^(p%2)`.
    ///
    /// Uses O(log p) matrix products. Entries wrap modulo 2^256 like every
    /// other [`U256`] operation.
    #[must_use]
    pub fn pow(self, exponent: u32) -> Self {
        match exponent {
            0 => Self::IDENTITY,
            1 => self,
            _ => {
                let half = self.pow(exponent / 2).square();
                if exponent % 2 == 1 {
                    half * self
                } else {
                    half
                }
            }
        }
    }
}

impl Mul for Matrix2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn m(a: u64, b: u64, c: u64, d: u64) -> Matrix2x2 {
        Matrix2x2 {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }

    #[test]
    fn product_is_row_by_column() {
        assert_eq!(m(1, 2, 3, 4) * m(5, 6, 7, 8), m(19, 22, 43, 50));
    }

    #[test]
    fn identity_is_neutral() {
        let x = m(3, 1, 4, 1);
        assert_eq!(x * Matrix2x2::IDENTITY, x);
        assert_eq!(Matrix2x2::IDENTITY * x, x);
    }

    #[test_case(0, m(1, 0, 0, 1); "zeroth power")]
    #[test_case(1, m(1, 1, 1, 0); "first power")]
    #[test_case(2, m(2, 1, 1, 1); "square")]
    #[test_case(5, m(8, 5, 5, 3); "odd power")]
    #[test_case(10, m(89, 55, 55, 34); "even power")]
    fn fibonacci_powers(exponent: u32, expected: Matrix2x2) {
        assert_eq!(Matrix2x2::FIBONACCI.pow(exponent), expected);
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        let base = m(2, 1, 1, 3);
        let mut expected = Matrix2x2::IDENTITY;
        for exponent in 0..40 {
            assert_eq!(base.pow(exponent), expected, "exponent {exponent}");
            expected = expected * base;
        }
    }
}
