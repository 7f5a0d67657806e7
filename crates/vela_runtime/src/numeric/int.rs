//! The default `Int`: an `i64` that silently promotes to `BigInt`.
//!
//! Results are always normalized, so a `Big` never holds a value that fits
//! in an `i64`. This keeps equality structural.

use super::overflow::{add_overflow, mul_overflow, sub_overflow};
use crate::errors::{VResult, ValueError, messages};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Int {
    Small(i64),
    Big(BigInt),
}

impl Int {
    pub fn normalize(b: BigInt) -> Int {
        match b.to_i64() {
            Some(i) => Int::Small(i),
            None => Int::Big(b),
        }
    }

    pub fn to_big(&self) -> BigInt {
        match self {
            Int::Small(i) => BigInt::from(*i),
            Int::Big(b) => b.clone(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Int::Small(i) => *i as f64,
            Int::Big(b) => b.to_f64().unwrap_or(if b.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Int::Small(0))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Int::Small(i) => *i < 0,
            Int::Big(b) => b.is_negative(),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Int::Small(i) => Some(*i),
            Int::Big(_) => None,
        }
    }
}

pub fn add(a: &Int, b: &Int) -> Int {
    if let (Int::Small(x), Int::Small(y)) = (a, b) {
        let (r, ok) = add_overflow(*x, *y);
        if ok {
            return Int::Small(r);
        }
    }
    Int::normalize(a.to_big() + b.to_big())
}

pub fn subtract(a: &Int, b: &Int) -> Int {
    if let (Int::Small(x), Int::Small(y)) = (a, b) {
        let (r, ok) = sub_overflow(*x, *y);
        if ok {
            return Int::Small(r);
        }
    }
    Int::normalize(a.to_big() - b.to_big())
}

pub fn multiply(a: &Int, b: &Int) -> Int {
    if let (Int::Small(x), Int::Small(y)) = (a, b) {
        let (r, ok) = mul_overflow(*x, *y);
        if ok {
            return Int::Small(r);
        }
    }
    Int::normalize(a.to_big() * b.to_big())
}

/// Floored division.
pub fn divide(a: &Int, b: &Int) -> VResult<Int> {
    if b.is_zero() {
        return Err(ValueError::ZeroDivision);
    }
    if let (Int::Small(x), Int::Small(y)) = (a, b) {
        if !(*x == i64::MIN && *y == -1) {
            return Ok(Int::Small(x.div_floor(y)));
        }
    }
    Ok(Int::normalize(a.to_big().div_floor(&b.to_big())))
}

/// Floored modulo: the result takes the sign of the divisor.
pub fn modulo(a: &Int, b: &Int) -> VResult<Int> {
    if b.is_zero() {
        return Err(ValueError::ZeroDivision);
    }
    if let (Int::Small(x), Int::Small(y)) = (a, b) {
        if *y == -1 {
            return Ok(Int::Small(0));
        }
        return Ok(Int::Small(x.mod_floor(y)));
    }
    Ok(Int::normalize(a.to_big().mod_floor(&b.to_big())))
}

/// Raises `a` to a non-negative power. A result that would need more than
/// `max_bits` bits fails instead of being computed.
pub fn exponentiate(a: &Int, b: &Int, max_bits: u64) -> VResult<Int> {
    if b.is_negative() {
        return Err(ValueError::out_of_range(messages::NEGATIVE_EXPONENT));
    }
    // Bases whose powers stay bounded accept any exponent.
    match a {
        Int::Small(0) => return Ok(Int::Small(if b.is_zero() { 1 } else { 0 })),
        Int::Small(1) => return Ok(Int::Small(1)),
        Int::Small(-1) => {
            let odd = match b {
                Int::Small(e) => e.is_odd(),
                Int::Big(e) => e.is_odd(),
            };
            return Ok(Int::Small(if odd { -1 } else { 1 }));
        }
        _ => {}
    }
    let exp = match b.to_i64().and_then(|e| u32::try_from(e).ok()) {
        Some(e) => e,
        None => return Err(ValueError::out_of_range(messages::EXPONENT_TOO_LARGE)),
    };
    if let Int::Small(x) = a {
        if let Some(r) = x.checked_pow(exp) {
            return Ok(Int::Small(r));
        }
    }
    let base = a.to_big();
    // |a| >= 2 here, so the result has at least exp * (bits - 1) bits.
    if u64::from(exp).saturating_mul(base.bits() - 1) > max_bits {
        return Err(ValueError::out_of_range(format!(
            "{}: {}",
            messages::EXPONENT_TOO_LARGE,
            exp
        )));
    }
    Ok(Int::normalize(base.pow(exp)))
}

pub fn negate(a: &Int) -> Int {
    match a {
        Int::Small(i) => match i.checked_neg() {
            Some(r) => Int::Small(r),
            None => Int::normalize(-BigInt::from(*i)),
        },
        Int::Big(b) => Int::normalize(-b.clone()),
    }
}

pub fn compare(a: &Int, b: &Int) -> Ordering {
    match (a, b) {
        (Int::Small(x), Int::Small(y)) => x.cmp(y),
        _ => a.to_big().cmp(&b.to_big()),
    }
}

pub fn bitwise_and(a: &Int, b: &Int) -> Int {
    match (a, b) {
        (Int::Small(x), Int::Small(y)) => Int::Small(x & y),
        _ => Int::normalize(a.to_big() & b.to_big()),
    }
}

pub fn bitwise_or(a: &Int, b: &Int) -> Int {
    match (a, b) {
        (Int::Small(x), Int::Small(y)) => Int::Small(x | y),
        _ => Int::normalize(a.to_big() | b.to_big()),
    }
}

pub fn bitwise_xor(a: &Int, b: &Int) -> Int {
    match (a, b) {
        (Int::Small(x), Int::Small(y)) => Int::Small(x ^ y),
        _ => Int::normalize(a.to_big() ^ b.to_big()),
    }
}

/// Shifts left by `count` bits; a negative count shifts right.
/// Counts above `max_shift` fail unless the value is zero.
pub fn left_shift(a: &Int, count: i64, max_shift: u64) -> VResult<Int> {
    if count < 0 {
        return Ok(right_shift(a, count.unsigned_abs()));
    }
    let count = count as u64;
    if a.is_zero() {
        return Ok(Int::Small(0));
    }
    if count > max_shift {
        return Err(ValueError::out_of_range(format!(
            "{}: {}",
            messages::SHIFT_TOO_LARGE,
            count
        )));
    }
    if let Int::Small(x) = a {
        if count < 63 {
            let shifted = x << count;
            if shifted >> count == *x {
                return Ok(Int::Small(shifted));
            }
        }
    }
    Ok(Int::normalize(a.to_big() << count))
}

/// Arithmetic right shift (rounds toward negative infinity).
pub fn right_shift(a: &Int, count: u64) -> Int {
    match a {
        Int::Small(x) => {
            if count >= 64 {
                Int::Small(if *x < 0 { -1 } else { 0 })
            } else {
                Int::Small(x >> count)
            }
        }
        Int::Big(b) => {
            if count >= b.bits() + 1 {
                return Int::Small(if b.is_negative() { -1 } else { 0 });
            }
            Int::normalize(b >> count)
        }
    }
}
