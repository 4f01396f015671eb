//! Fixed-width 256-bit unsigned integers.
//!
//! A [`U256`] is four little-endian 64-bit limbs. Every arithmetic operation
//! wraps modulo 2^256, the same way Rust's primitive unsigned integers behave
//! under `wrapping_*`. The `overflowing_*` variants additionally report the
//! carry or borrow out of the top limb.
use core::cmp::Ordering;
use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, Mul, MulAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};
use core::str::FromStr;

use itertools::izip;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of 64-bit limbs in a [`U256`].
pub const LIMBS: usize = 4;
/// Width of a single limb in bits.
pub const LIMB_BITS: u32 = u64::BITS;
/// Width of a [`U256`] in bits.
#[allow(clippy::cast_possible_truncation)]
pub const BITS: u32 = LIMB_BITS * LIMBS as u32;
/// `U256::MAX` has 78 decimal digits.
pub const MAX_DECIMAL_DIGITS: usize = 78;

/// 256-bit unsigned integer.
///
/// Limb 0 is the least significant, so the value is
/// `sum(words[i] * 2^(64 * i))`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct U256([u64; LIMBS]);

/// Double-word product `a * b + carry`, split into `(low, high)` limbs.
///
/// Cannot overflow: `(2^64 - 1)^2 + (2^64 - 1) < 2^128`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn mul_add_carry(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let wide = u128::from(a) * u128::from(b) + u128::from(carry);
    (wide as u64, (wide >> LIMB_BITS) as u64)
}

impl U256 {
    pub const MAX: Self = Self([u64::MAX; LIMBS]);
    pub const ONE: Self = Self([1, 0, 0, 0]);
    pub const ZERO: Self = Self([0; LIMBS]);

    /// Builds a value from its limbs, least significant first.
    #[must_use]
    pub const fn from_words(words: [u64; LIMBS]) -> Self { Self(words) }

    /// Limbs of this value, least significant first.
    #[must_use]
    pub const fn words(&self) -> [u64; LIMBS] { self.0 }

    #[must_use]
    pub fn is_zero(&self) -> bool { self.0 == [0; LIMBS] }

    /// Adds limb by limb, propagating the carry upwards.
    ///
    /// A limb can overflow either when adding the two words or when adding
    /// the incoming carry to that partial sum; the outgoing carry is set if
    /// either happened. The returned flag is the carry out of the top limb.
    #[must_use]
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let mut words = [0; LIMBS];
        let mut carry = false;
        for (out, a, b) in izip!(&mut words, self.0, rhs.0) {
            let (partial, word_overflow) = a.overflowing_add(b);
            let (sum, carry_overflow) = partial.overflowing_add(u64::from(carry));
            *out = sum;
            carry = word_overflow || carry_overflow;
        }
        (Self(words), carry)
    }

    /// Subtracts limb by limb, propagating the borrow upwards. The returned
    /// flag is the borrow out of the top limb.
    #[must_use]
    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let mut words = [0; LIMBS];
        let mut borrow = false;
        for (out, a, b) in izip!(&mut words, self.0, rhs.0) {
            let (partial, word_underflow) = a.overflowing_sub(b);
            let (diff, borrow_underflow) = partial.overflowing_sub(u64::from(borrow));
            *out = diff;
            borrow = word_underflow || borrow_underflow;
        }
        (Self(words), borrow)
    }

    /// Multiplies by a single limb. The returned flag is set when the final
    /// carry out of the top limb is non-zero.
    #[must_use]
    pub fn overflowing_mul_u64(self, scalar: u64) -> (Self, bool) {
        let mut words = [0; LIMBS];
        let mut carry = 0;
        for (out, word) in izip!(&mut words, self.0) {
            (*out, carry) = mul_add_carry(word, scalar, carry);
        }
        (Self(words), carry != 0)
    }

    #[must_use]
    pub fn wrapping_add(self, rhs: Self) -> Self { self.overflowing_add(rhs).0 }

    #[must_use]
    pub fn wrapping_sub(self, rhs: Self) -> Self { self.overflowing_sub(rhs).0 }

    #[must_use]
    pub fn wrapping_mul_u64(self, scalar: u64) -> Self { self.overflowing_mul_u64(scalar).0 }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Some(sum),
            (_, true) => None,
        }
    }

    #[must_use]
    pub fn checked_mul_u64(self, scalar: u64) -> Option<Self> {
        match self.overflowing_mul_u64(scalar) {
            (product, false) => Some(product),
            (_, true) => None,
        }
    }

    /// Schoolbook multiplication: `sum((self << 64 * i) * rhs.words[i])`.
    ///
    /// Partial products that land above bit 255 are dropped, as are zero
    /// limbs of `rhs`.
    #[must_use]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let mut product = Self::ZERO;
        let mut shifted = self;
        for word in rhs.0 {
            if word != 0 {
                product = product.wrapping_add(shifted.wrapping_mul_u64(word));
            }
            shifted = shifted.shl_bits(LIMB_BITS);
        }
        product
    }

    /// Logical left shift. Shifts of [`BITS`] or more yield zero.
    ///
    /// Whole limbs move first, then the remaining `shift % 64` bits are
    /// carried across adjacent limbs.
    #[must_use]
    pub fn shl_bits(self, shift: u32) -> Self {
        if shift == 0 {
            return self;
        }
        if shift >= BITS {
            return Self::ZERO;
        }
        let limb_shift = (shift / LIMB_BITS) as usize;
        let bit_shift = shift % LIMB_BITS;

        let mut words = [0; LIMBS];
        words[limb_shift..].copy_from_slice(&self.0[..LIMBS - limb_shift]);
        if bit_shift > 0 {
            for i in (1..LIMBS).rev() {
                words[i] = (words[i] << bit_shift) | (words[i - 1] >> (LIMB_BITS - bit_shift));
            }
            words[0] <<= bit_shift;
        }
        Self(words)
    }

    /// Logical right shift. Shifts of [`BITS`] or more yield zero.
    #[must_use]
    pub fn shr_bits(self, shift: u32) -> Self {
        if shift == 0 {
            return self;
        }
        if shift >= BITS {
            return Self::ZERO;
        }
        let limb_shift = (shift / LIMB_BITS) as usize;
        let bit_shift = shift % LIMB_BITS;

        let mut words = [0; LIMBS];
        words[..LIMBS - limb_shift].copy_from_slice(&self.0[limb_shift..]);
        if bit_shift > 0 {
            for i in 0..LIMBS - 1 {
                words[i] = (words[i] >> bit_shift) | (words[i + 1] << (LIMB_BITS - bit_shift));
            }
            words[LIMBS - 1] >>= bit_shift;
        }
        Self(words)
    }

    /// Long division by a single non-zero limb, most significant limb first.
    /// The remainder of each step becomes the high half of the next dividend.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn div_rem_u64(self, divisor: u64) -> (Self, u64) {
        debug_assert_ne!(divisor, 0, "division by zero");
        let divisor = u128::from(divisor);
        let mut words = [0; LIMBS];
        let mut remainder = 0_u64;
        for (out, word) in words.iter_mut().zip(self.0).rev() {
            let dividend = (u128::from(remainder) << LIMB_BITS) | u128::from(word);
            // remainder < divisor, so the quotient fits in one limb.
            *out = (dividend / divisor) as u64;
            remainder = (dividend % divisor) as u64;
        }
        (Self(words), remainder)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self { Self([value, 0, 0, 0]) }
}

impl Ord for U256 {
    /// The most significant differing limb decides.
    fn cmp(&self, other: &Self) -> Ordering { self.0.iter().rev().cmp(other.0.iter().rev()) }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Add for U256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
}

impl Sub for U256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
}

impl Mul for U256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
}

impl Mul<u64> for U256 {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self { self.wrapping_mul_u64(rhs) }
}

impl Shl<u32> for U256 {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self { self.shl_bits(rhs) }
}

impl Shr<u32> for U256 {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self { self.shr_bits(rhs) }
}

impl BitAnd for U256 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        let mut words = self.0;
        for (out, b) in izip!(&mut words, rhs.0) {
            *out &= b;
        }
        Self(words)
    }
}

macro_rules! assign_via_binop {
    ($assign_trait:ident, $assign_fn:ident, $rhs:ty, $op:tt) => {
        impl $assign_trait<$rhs> for U256 {
            fn $assign_fn(&mut self, rhs: $rhs) { *self = *self $op rhs; }
        }
    };
}

assign_via_binop!(AddAssign, add_assign, U256, +);
assign_via_binop!(SubAssign, sub_assign, U256, -);
assign_via_binop!(MulAssign, mul_assign, U256, *);
assign_via_binop!(MulAssign, mul_assign, u64, *);
assign_via_binop!(ShlAssign, shl_assign, u32, <<);
assign_via_binop!(ShrAssign, shr_assign, u32, >>);
assign_via_binop!(BitAndAssign, bitand_assign, U256, &);

impl fmt::Display for U256 {
    /// Decimal rendering by repeated division by ten.
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad("0");
        }
        let mut digits = Vec::with_capacity(MAX_DECIMAL_DIGITS);
        let mut value = *self;
        while !value.is_zero() {
            let (quotient, digit) = value.div_rem_u64(10);
            digits.push(char::from(b'0' + digit as u8));
            value = quotient;
        }
        let rendered: String = digits.into_iter().rev().collect();
        f.pad(&rendered)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseU256Error {
    #[error("cannot parse a 256-bit integer from an empty string")]
    Empty,
    #[error("invalid decimal digit {0:?}")]
    InvalidDigit(char),
    #[error("number does not fit in 256 bits")]
    Overflow,
}

impl FromStr for U256 {
    type Err = ParseU256Error;

    /// Parses a plain base-10 numeral. Signs, separators and whitespace are
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseU256Error::Empty);
        }
        s.chars().try_fold(Self::ZERO, |acc, c| {
            let digit = c.to_digit(10).ok_or(ParseU256Error::InvalidDigit(c))?;
            acc.checked_mul_u64(10)
                .and_then(|acc| acc.checked_add(Self::from(u64::from(digit))))
                .ok_or(ParseU256Error::Overflow)
        })
    }
}
