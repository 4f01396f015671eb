#![deny(clippy::pedantic)]
#![deny(clippy::cargo)]
// Some of our dependencies transitively depend on different versions of the same crates, like syn
// and bitflags. TODO: remove once our dependencies no longer do that.
#![allow(clippy::multiple_crate_versions)]

pub mod fibonacci;
pub(crate) mod matrix;
pub mod reference;
#[cfg(any(feature = "test", test))]
pub mod test_utils;
pub mod timer;
pub mod uint256;

pub use fibonacci::{fibonacci, fibonacci_range, fibonacci_range_linear};
pub use uint256::U256;
