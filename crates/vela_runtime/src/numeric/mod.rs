//! The numeric tower.
//!
//! Every numeric value is lifted into a [`Number`], combined through the
//! pairwise coercion table in [`coerce`], and lowered back into a `Value` by
//! the runtime. Only the default `Int`/`Float` (and `BigFloat`) widen into one
//! another; any mix involving a fixed-width kind other than the identical kind
//! is a coercion error.

pub mod big_float;
pub mod fixed;
pub mod float;
pub mod int;
pub mod overflow;

pub use big_float::BigFloat;
pub use int::Int;
pub use overflow::{add_overflow, mul_overflow, sub_overflow};

use crate::errors::{VResult, ValueError, messages};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::cmp::Ordering;

/// Precision given to an `Int` converted into a `BigFloat`.
const SMALL_INT_PRECISION: u32 = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumKind {
    Int,
    Float,
    BigFloat,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl NumKind {
    pub fn class_name(self) -> &'static str {
        match self {
            NumKind::Int => "Std::Int",
            NumKind::Float => "Std::Float",
            NumKind::BigFloat => "Std::BigFloat",
            NumKind::Int8 => "Std::Int8",
            NumKind::Int16 => "Std::Int16",
            NumKind::Int32 => "Std::Int32",
            NumKind::Int64 => "Std::Int64",
            NumKind::UInt8 => "Std::UInt8",
            NumKind::UInt16 => "Std::UInt16",
            NumKind::UInt32 => "Std::UInt32",
            NumKind::UInt64 => "Std::UInt64",
            NumKind::Float32 => "Std::Float32",
            NumKind::Float64 => "Std::Float64",
        }
    }

    /// Literal suffix used by `inspect`.
    pub fn suffix(self) -> &'static str {
        match self {
            NumKind::Int | NumKind::Float => "",
            NumKind::BigFloat => "bf",
            NumKind::Int8 => "i8",
            NumKind::Int16 => "i16",
            NumKind::Int32 => "i32",
            NumKind::Int64 => "i64",
            NumKind::UInt8 => "u8",
            NumKind::UInt16 => "u16",
            NumKind::UInt32 => "u32",
            NumKind::UInt64 => "u64",
            NumKind::Float32 => "f32",
            NumKind::Float64 => "f64",
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(
            self,
            NumKind::Float | NumKind::BigFloat | NumKind::Float32 | NumKind::Float64
        )
    }
}

/// An owned numeric operand or result.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(Int),
    Float(f64),
    BigFloat(BigFloat),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponentiate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

/// Both operands lifted to one shared representation.
enum Pair {
    Int(Int, Int),
    Float(f64, f64),
    BigFloat(BigFloat, BigFloat),
    Int8(i8, i8),
    Int16(i16, i16),
    Int32(i32, i32),
    Int64(i64, i64),
    UInt8(u8, u8),
    UInt16(u16, u16),
    UInt32(u32, u32),
    UInt64(u64, u64),
    Float32(f32, f32),
    Float64(f64, f64),
}

impl Number {
    pub fn small(i: i64) -> Self {
        Number::Int(Int::Small(i))
    }

    pub fn big(b: BigInt) -> Self {
        Number::Int(Int::normalize(b))
    }

    pub fn kind(&self) -> NumKind {
        match self {
            Number::Int(_) => NumKind::Int,
            Number::Float(_) => NumKind::Float,
            Number::BigFloat(_) => NumKind::BigFloat,
            Number::Int8(_) => NumKind::Int8,
            Number::Int16(_) => NumKind::Int16,
            Number::Int32(_) => NumKind::Int32,
            Number::Int64(_) => NumKind::Int64,
            Number::UInt8(_) => NumKind::UInt8,
            Number::UInt16(_) => NumKind::UInt16,
            Number::UInt32(_) => NumKind::UInt32,
            Number::UInt64(_) => NumKind::UInt64,
            Number::Float32(_) => NumKind::Float32,
            Number::Float64(_) => NumKind::Float64,
        }
    }

    /// The exact integer value of any integer kind.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Number::Int(i) => Some(i.to_big()),
            Number::Int8(i) => Some(BigInt::from(*i)),
            Number::Int16(i) => Some(BigInt::from(*i)),
            Number::Int32(i) => Some(BigInt::from(*i)),
            Number::Int64(i) => Some(BigInt::from(*i)),
            Number::UInt8(i) => Some(BigInt::from(*i)),
            Number::UInt16(i) => Some(BigInt::from(*i)),
            Number::UInt32(i) => Some(BigInt::from(*i)),
            Number::UInt64(i) => Some(BigInt::from(*i)),
            _ => None,
        }
    }

    /// Integer value as `i64`, for counts and indices. `None` for floats and
    /// for integers outside the `i64` range.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => i.to_i64(),
            Number::Int8(i) => Some(*i as i64),
            Number::Int16(i) => Some(*i as i64),
            Number::Int32(i) => Some(*i as i64),
            Number::Int64(i) => Some(*i),
            Number::UInt8(i) => Some(*i as i64),
            Number::UInt16(i) => Some(*i as i64),
            Number::UInt32(i) => Some(*i as i64),
            Number::UInt64(i) => i64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Int(i) => i.to_f64(),
            Number::Float(f) | Number::Float64(f) => *f,
            Number::Float32(f) => *f as f64,
            Number::BigFloat(b) => b.to_f64(),
            other => other
                .to_bigint()
                .and_then(|b| b.to_f64())
                .unwrap_or(f64::NAN),
        }
    }

    /// Exact conversion into a `BigFloat` of at least `precision` bits.
    pub fn to_big_float(&self, precision: u32) -> BigFloat {
        match self {
            Number::BigFloat(b) => b.clone(),
            Number::Float(f) | Number::Float64(f) => {
                BigFloat::from_f64(*f, precision.max(big_float::F64_PRECISION))
            }
            Number::Float32(f) => BigFloat::from_f64(*f as f64, precision.max(24)),
            other => {
                let b = other.to_bigint().unwrap_or_default();
                let needed = (b.bits() as u32).max(SMALL_INT_PRECISION);
                BigFloat::from_bigint(&b, precision.max(needed))
            }
        }
    }

    fn coercion_error(&self, other: &Number) -> ValueError {
        ValueError::coercion(other.kind().class_name(), self.kind().class_name())
    }
}

/// The pairwise coercion table.
fn coerce(a: Number, b: Number) -> VResult<Pair> {
    use Number as N;
    Ok(match (a, b) {
        (N::Int(x), N::Int(y)) => Pair::Int(x, y),
        (N::Int(x), N::Float(y)) => Pair::Float(x.to_f64(), y),
        (N::Float(x), N::Int(y)) => Pair::Float(x, y.to_f64()),
        (N::Float(x), N::Float(y)) => Pair::Float(x, y),
        (N::BigFloat(x), N::BigFloat(y)) => Pair::BigFloat(x, y),
        (N::BigFloat(x), y @ (N::Int(_) | N::Float(_))) => {
            let y = y.to_big_float(x.precision());
            Pair::BigFloat(x, y)
        }
        (x @ (N::Int(_) | N::Float(_)), N::BigFloat(y)) => {
            let x = x.to_big_float(y.precision());
            Pair::BigFloat(x, y)
        }
        (N::Int8(x), N::Int8(y)) => Pair::Int8(x, y),
        (N::Int16(x), N::Int16(y)) => Pair::Int16(x, y),
        (N::Int32(x), N::Int32(y)) => Pair::Int32(x, y),
        (N::Int64(x), N::Int64(y)) => Pair::Int64(x, y),
        (N::UInt8(x), N::UInt8(y)) => Pair::UInt8(x, y),
        (N::UInt16(x), N::UInt16(y)) => Pair::UInt16(x, y),
        (N::UInt32(x), N::UInt32(y)) => Pair::UInt32(x, y),
        (N::UInt64(x), N::UInt64(y)) => Pair::UInt64(x, y),
        (N::Float32(x), N::Float32(y)) => Pair::Float32(x, y),
        (N::Float64(x), N::Float64(y)) => Pair::Float64(x, y),
        (a, b) => return Err(a.coercion_error(&b)),
    })
}

macro_rules! fixed_arith {
    ($op:expr, $x:expr, $y:expr, $variant:ident) => {
        Number::$variant(match $op {
            ArithOp::Add => fixed::add($x, $y),
            ArithOp::Subtract => fixed::subtract($x, $y),
            ArithOp::Multiply => fixed::multiply($x, $y),
            ArithOp::Divide => fixed::divide($x, $y)?,
            ArithOp::Modulo => fixed::modulo($x, $y)?,
            ArithOp::Exponentiate => fixed::exponentiate($x, $y as i64)?,
        })
    };
}

macro_rules! float_arith {
    ($op:expr, $x:expr, $y:expr, $variant:ident) => {
        Number::$variant(match $op {
            ArithOp::Add => $x + $y,
            ArithOp::Subtract => $x - $y,
            ArithOp::Multiply => $x * $y,
            ArithOp::Divide => $x / $y,
            ArithOp::Modulo => float::floor_mod($x, $y),
            ArithOp::Exponentiate => float::pow($x, $y),
        })
    };
}

/// Binary arithmetic entry point for every numeric kind. `max_pow_bits`
/// bounds the size of default-`Int` powers.
pub fn arith(op: ArithOp, a: Number, b: Number, max_pow_bits: u64) -> VResult<Number> {
    Ok(match coerce(a, b)? {
        Pair::Int(x, y) => Number::Int(match op {
            ArithOp::Add => int::add(&x, &y),
            ArithOp::Subtract => int::subtract(&x, &y),
            ArithOp::Multiply => int::multiply(&x, &y),
            ArithOp::Divide => int::divide(&x, &y)?,
            ArithOp::Modulo => int::modulo(&x, &y)?,
            ArithOp::Exponentiate => int::exponentiate(&x, &y, max_pow_bits)?,
        }),
        Pair::Float(x, y) => float_arith!(op, x, y, Float),
        Pair::BigFloat(x, y) => Number::BigFloat(match op {
            ArithOp::Add => x.add(&y),
            ArithOp::Subtract => x.subtract(&y),
            ArithOp::Multiply => x.multiply(&y),
            ArithOp::Divide => x.divide(&y),
            ArithOp::Modulo => x.modulo(&y),
            ArithOp::Exponentiate => x.pow(&y),
        }),
        Pair::Int8(x, y) => fixed_arith!(op, x, y, Int8),
        Pair::Int16(x, y) => fixed_arith!(op, x, y, Int16),
        Pair::Int32(x, y) => fixed_arith!(op, x, y, Int32),
        Pair::Int64(x, y) => fixed_arith!(op, x, y, Int64),
        Pair::UInt8(x, y) => fixed_arith!(op, x, y, UInt8),
        Pair::UInt16(x, y) => fixed_arith!(op, x, y, UInt16),
        Pair::UInt32(x, y) => fixed_arith!(op, x, y, UInt32),
        Pair::UInt64(x, y) => {
            if op == ArithOp::Exponentiate && y > i64::MAX as u64 {
                return Err(ValueError::out_of_range(messages::EXPONENT_TOO_LARGE));
            }
            fixed_arith!(op, x, y, UInt64)
        }
        Pair::Float32(x, y) => float_arith!(op, x, y, Float32),
        Pair::Float64(x, y) => float_arith!(op, x, y, Float64),
    })
}

/// Three-way comparison. `Ok(None)` when the values are unordered (NaN).
pub fn compare(a: Number, b: Number) -> VResult<Option<Ordering>> {
    Ok(match coerce(a, b)? {
        Pair::Int(x, y) => Some(int::compare(&x, &y)),
        Pair::Float(x, y) | Pair::Float64(x, y) => float::compare(x, y),
        Pair::Float32(x, y) => float::compare(x, y),
        Pair::BigFloat(x, y) => x.compare(&y),
        Pair::Int8(x, y) => Some(x.cmp(&y)),
        Pair::Int16(x, y) => Some(x.cmp(&y)),
        Pair::Int32(x, y) => Some(x.cmp(&y)),
        Pair::Int64(x, y) => Some(x.cmp(&y)),
        Pair::UInt8(x, y) => Some(x.cmp(&y)),
        Pair::UInt16(x, y) => Some(x.cmp(&y)),
        Pair::UInt32(x, y) => Some(x.cmp(&y)),
        Pair::UInt64(x, y) => Some(x.cmp(&y)),
    })
}

/// Strict equality: same kind and same value. NaN is never equal.
pub fn equal(a: &Number, b: &Number) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    matches!(compare(a.clone(), b.clone()), Ok(Some(Ordering::Equal)))
}

/// Numeric equality across kinds (`1 =~ 1.0`, `1i8 =~ 1`).
pub fn lax_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.to_bigint(), b.to_bigint()) {
        return x == y;
    }
    match (a, b) {
        (Number::BigFloat(_), _) | (_, Number::BigFloat(_)) => {
            let x = a.to_big_float(0);
            let y = b.to_big_float(0);
            x.compare(&y) == Some(Ordering::Equal)
        }
        _ if a.kind().is_integer() || b.kind().is_integer() => {
            // Compare integers against floats exactly.
            let x = a.to_big_float(0);
            let y = b.to_big_float(0);
            x.compare(&y) == Some(Ordering::Equal)
        }
        _ => a.to_f64() == b.to_f64(),
    }
}

pub fn negate(a: Number) -> Number {
    match a {
        Number::Int(i) => Number::Int(int::negate(&i)),
        Number::Float(f) => Number::Float(-f),
        Number::BigFloat(b) => Number::BigFloat(b.negate()),
        Number::Int8(i) => Number::Int8(fixed::negate(i)),
        Number::Int16(i) => Number::Int16(fixed::negate(i)),
        Number::Int32(i) => Number::Int32(fixed::negate(i)),
        Number::Int64(i) => Number::Int64(fixed::negate(i)),
        Number::UInt8(i) => Number::UInt8(fixed::negate(i)),
        Number::UInt16(i) => Number::UInt16(fixed::negate(i)),
        Number::UInt32(i) => Number::UInt32(fixed::negate(i)),
        Number::UInt64(i) => Number::UInt64(fixed::negate(i)),
        Number::Float32(f) => Number::Float32(-f),
        Number::Float64(f) => Number::Float64(-f),
    }
}

fn integer_pair(a: Number, b: Number) -> VResult<Pair> {
    let pair = coerce(a, b)?;
    match pair {
        Pair::Float(..) => Err(ValueError::coercion("Std::Float", "Std::Int")),
        Pair::BigFloat(..) => Err(ValueError::coercion("Std::BigFloat", "Std::Int")),
        Pair::Float32(..) => Err(ValueError::type_error("bitwise operation on Std::Float32")),
        Pair::Float64(..) => Err(ValueError::type_error("bitwise operation on Std::Float64")),
        pair => Ok(pair),
    }
}

macro_rules! fixed_bits {
    ($op:expr, $x:expr, $y:expr, $variant:ident) => {
        Number::$variant(match $op {
            BitOp::And => fixed::bitwise_and($x, $y),
            BitOp::Or => fixed::bitwise_or($x, $y),
            BitOp::Xor => fixed::bitwise_xor($x, $y),
        })
    };
}

pub fn bitwise(op: BitOp, a: Number, b: Number) -> VResult<Number> {
    Ok(match integer_pair(a, b)? {
        Pair::Int(x, y) => Number::Int(match op {
            BitOp::And => int::bitwise_and(&x, &y),
            BitOp::Or => int::bitwise_or(&x, &y),
            BitOp::Xor => int::bitwise_xor(&x, &y),
        }),
        Pair::Int8(x, y) => fixed_bits!(op, x, y, Int8),
        Pair::Int16(x, y) => fixed_bits!(op, x, y, Int16),
        Pair::Int32(x, y) => fixed_bits!(op, x, y, Int32),
        Pair::Int64(x, y) => fixed_bits!(op, x, y, Int64),
        Pair::UInt8(x, y) => fixed_bits!(op, x, y, UInt8),
        Pair::UInt16(x, y) => fixed_bits!(op, x, y, UInt16),
        Pair::UInt32(x, y) => fixed_bits!(op, x, y, UInt32),
        Pair::UInt64(x, y) => fixed_bits!(op, x, y, UInt64),
        Pair::Float(..) | Pair::BigFloat(..) | Pair::Float32(..) | Pair::Float64(..) => {
            unreachable!("integer_pair rejects float pairs")
        }
    })
}

/// Extracts a shift count from any integer kind. Counts that do not fit in
/// an `i64` are out of range.
fn shift_count(value: &Number) -> VResult<i64> {
    if !value.kind().is_integer() {
        return Err(ValueError::coercion(value.kind().class_name(), "Std::Int"));
    }
    value
        .to_i64()
        .ok_or_else(|| ValueError::out_of_range(messages::SHIFT_TOO_LARGE))
}

/// `a << count`. The count may be any integer kind; a negative count shifts
/// the other way.
pub fn left_shift(a: Number, count: &Number, max_shift: u64) -> VResult<Number> {
    let n = shift_count(count)?;
    Ok(match a {
        Number::Int(i) => Number::Int(int::left_shift(&i, n, max_shift)?),
        Number::Int8(i) => Number::Int8(fixed::left_shift(i, n)),
        Number::Int16(i) => Number::Int16(fixed::left_shift(i, n)),
        Number::Int32(i) => Number::Int32(fixed::left_shift(i, n)),
        Number::Int64(i) => Number::Int64(fixed::left_shift(i, n)),
        Number::UInt8(i) => Number::UInt8(fixed::left_shift(i, n)),
        Number::UInt16(i) => Number::UInt16(fixed::left_shift(i, n)),
        Number::UInt32(i) => Number::UInt32(fixed::left_shift(i, n)),
        Number::UInt64(i) => Number::UInt64(fixed::left_shift(i, n)),
        other => return Err(ValueError::coercion(other.kind().class_name(), "Std::Int")),
    })
}

/// `a >> count`, the mirror of [`left_shift`].
pub fn right_shift(a: Number, count: &Number, max_shift: u64) -> VResult<Number> {
    let n = shift_count(count)?;
    if n < 0 {
        return left_shift(a, &Number::small(n.saturating_neg()), max_shift);
    }
    let n = n as u64;
    Ok(match a {
        Number::Int(i) => Number::Int(int::right_shift(&i, n)),
        Number::Int8(i) => Number::Int8(fixed::right_shift(i, n)),
        Number::Int16(i) => Number::Int16(fixed::right_shift(i, n)),
        Number::Int32(i) => Number::Int32(fixed::right_shift(i, n)),
        Number::Int64(i) => Number::Int64(fixed::right_shift(i, n)),
        Number::UInt8(i) => Number::UInt8(fixed::right_shift(i, n)),
        Number::UInt16(i) => Number::UInt16(fixed::right_shift(i, n)),
        Number::UInt32(i) => Number::UInt32(fixed::right_shift(i, n)),
        Number::UInt64(i) => Number::UInt64(fixed::right_shift(i, n)),
        other => return Err(ValueError::coercion(other.kind().class_name(), "Std::Int")),
    })
}
