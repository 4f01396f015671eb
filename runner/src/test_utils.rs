use proptest::prelude::any;
use proptest::prop_oneof;
use proptest::strategy::{Just, Strategy};

use crate::uint256::{BITS, LIMBS, LIMB_BITS, U256};

#[allow(clippy::cast_sign_loss)]
pub fn u64_extra() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0_u64),
        Just(1_u64),
        Just(u64::MAX),
        any::<u64>(),
        Just(i64::MIN as u64),
        Just(i64::MAX as u64),
    ]
}

/// Limb-wise edge cases, so carries and borrows between limbs get exercised
/// far more often than with uniformly random words.
pub fn u256_extra() -> impl Strategy<Value = U256> {
    prop_oneof![
        Just(U256::ZERO),
        Just(U256::ONE),
        Just(U256::MAX),
        any::<[u64; LIMBS]>().prop_map(U256::from_words),
        [u64_extra(), u64_extra(), u64_extra(), u64_extra()].prop_map(U256::from_words),
        u64_extra().prop_map(U256::from),
    ]
}

/// Shift amounts clustered around limb boundaries, plus a few past the width.
#[allow(clippy::cast_possible_truncation)]
pub fn shift_amount() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(0_u32),
        (0..BITS),
        (1..LIMBS as u32).prop_map(|limbs| limbs * LIMB_BITS),
        (1..LIMBS as u32).prop_map(|limbs| limbs * LIMB_BITS - 1),
        (BITS..2 * BITS),
    ]
}
