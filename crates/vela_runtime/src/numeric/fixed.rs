//! Fixed-width integers (`Int8`…`UInt64`).
//!
//! Arithmetic wraps in two's complement; only division and modulo by zero
//! fail. Division and modulo are floored like the default `Int`.

use crate::errors::{VResult, ValueError, messages};
use num_traits::{CheckedRem, PrimInt, WrappingAdd, WrappingMul, WrappingSub};

pub trait FixedInt: PrimInt + CheckedRem + WrappingAdd + WrappingSub + WrappingMul {
    fn is_signed() -> bool {
        Self::min_value() < Self::zero()
    }

    fn bit_width() -> u32 {
        (std::mem::size_of::<Self>() * 8) as u32
    }
}

impl FixedInt for i8 {}
impl FixedInt for i16 {}
impl FixedInt for i32 {}
impl FixedInt for i64 {}
impl FixedInt for u8 {}
impl FixedInt for u16 {}
impl FixedInt for u32 {}
impl FixedInt for u64 {}

pub fn add<T: FixedInt>(a: T, b: T) -> T {
    a.wrapping_add(&b)
}

pub fn subtract<T: FixedInt>(a: T, b: T) -> T {
    a.wrapping_sub(&b)
}

pub fn multiply<T: FixedInt>(a: T, b: T) -> T {
    a.wrapping_mul(&b)
}

fn signs_differ<T: FixedInt>(a: T, b: T) -> bool {
    (a < T::zero()) != (b < T::zero())
}

pub fn divide<T: FixedInt>(a: T, b: T) -> VResult<T> {
    if b.is_zero() {
        return Err(ValueError::ZeroDivision);
    }
    // MIN / -1 is the only overflowing quotient; it wraps back to MIN.
    let q = a.checked_div(&b).unwrap_or(a);
    let r = a.checked_rem(&b).unwrap_or_else(T::zero);
    if !r.is_zero() && signs_differ(r, b) {
        return Ok(q - T::one());
    }
    Ok(q)
}

pub fn modulo<T: FixedInt>(a: T, b: T) -> VResult<T> {
    if b.is_zero() {
        return Err(ValueError::ZeroDivision);
    }
    let r = a.checked_rem(&b).unwrap_or_else(T::zero);
    if !r.is_zero() && signs_differ(r, b) {
        return Ok(r + b);
    }
    Ok(r)
}

pub fn exponentiate<T: FixedInt>(a: T, exp: i64) -> VResult<T> {
    if exp < 0 {
        return Err(ValueError::out_of_range(messages::NEGATIVE_EXPONENT));
    }
    let mut base = a;
    let mut acc = T::one();
    let mut n = exp as u64;
    while n > 0 {
        if n & 1 == 1 {
            acc = acc.wrapping_mul(&base);
        }
        n >>= 1;
        if n > 0 {
            base = base.wrapping_mul(&base);
        }
    }
    Ok(acc)
}

pub fn negate<T: FixedInt>(a: T) -> T {
    T::zero().wrapping_sub(&a)
}

/// Left shift; a negative count shifts right. Bits shifted past the width
/// are lost, so oversized counts yield zero.
pub fn left_shift<T: FixedInt>(a: T, count: i64) -> T {
    if count < 0 {
        return right_shift(a, count.unsigned_abs());
    }
    if count as u64 >= T::bit_width() as u64 {
        return T::zero();
    }
    a << count as usize
}

/// Arithmetic right shift for signed types, logical for unsigned ones.
pub fn right_shift<T: FixedInt>(a: T, count: u64) -> T {
    if count >= T::bit_width() as u64 {
        return if T::is_signed() && a < T::zero() {
            !T::zero()
        } else {
            T::zero()
        };
    }
    a >> count as usize
}

pub fn bitwise_and<T: FixedInt>(a: T, b: T) -> T {
    a & b
}

pub fn bitwise_or<T: FixedInt>(a: T, b: T) -> T {
    a | b
}

pub fn bitwise_xor<T: FixedInt>(a: T, b: T) -> T {
    a ^ b
}
