//! Overflow-aware fixed-precision arithmetic.
//!
//! Each helper returns the wrapped result together with an `ok` flag that is
//! `false` when the exact mathematical result does not fit. The default `Int`
//! uses `ok == false` as the signal to redo the operation in arbitrary
//! precision instead of wrapping.

use num_traits::ops::overflowing::{OverflowingAdd, OverflowingMul, OverflowingSub};

#[inline]
pub fn add_overflow<T: OverflowingAdd>(a: T, b: T) -> (T, bool) {
    let (r, overflowed) = a.overflowing_add(&b);
    (r, !overflowed)
}

#[inline]
pub fn sub_overflow<T: OverflowingSub>(a: T, b: T) -> (T, bool) {
    let (r, overflowed) = a.overflowing_sub(&b);
    (r, !overflowed)
}

#[inline]
pub fn mul_overflow<T: OverflowingMul>(a: T, b: T) -> (T, bool) {
    let (r, overflowed) = a.overflowing_mul(&b);
    (r, !overflowed)
}
